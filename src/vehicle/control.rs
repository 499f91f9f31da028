use log::debug;
use serde::Deserialize;

use super::telemetry::VesselTelemetry;

// ---------------------------------------------------------------------------
// Command interface
// ---------------------------------------------------------------------------

/// Attitude-hold modes offered by the vessel's stability assist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SasMode {
    Off,
    Prograde,
    Retrograde,
}

/// Write side of the external vessel collaborator.
pub trait VesselControl {
    /// Throttle in `[0, 1]`.
    fn set_throttle(&mut self, throttle: f64);
    /// Autopilot target, degrees above the horizon and compass heading.
    fn target_pitch_and_heading(&mut self, pitch: f64, heading: f64);
    fn engage_autopilot(&mut self);
    fn disengage_autopilot(&mut self);
    /// `SasMode::Off` disables stability assist entirely.
    fn set_sas_mode(&mut self, mode: SasMode);
    fn activate_next_stage(&mut self);
    fn deploy_gear(&mut self);
    fn add_node(&mut self, epoch: f64, prograde: f64);
    fn remove_nodes(&mut self);
    /// Fast-forward universal time to `epoch`. Disengages attitude hold.
    fn warp_to(&mut self, epoch: f64);
}

/// A vessel that can be both read and commanded.
pub trait Vessel: VesselTelemetry + VesselControl {}

impl<T: VesselTelemetry + VesselControl + ?Sized> Vessel for T {}

// ---------------------------------------------------------------------------
// Control directive
// ---------------------------------------------------------------------------

/// Attitude part of a directive.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum AttitudeCommand {
    /// Leave the current attitude target alone.
    #[default]
    Hold,
    /// Autopilot pitch (deg above horizon) and heading (deg).
    PitchHeading { pitch: f64, heading: f64 },
    Sas(SasMode),
}

/// Output of one controller tick. `None` and `Hold` leave the vessel as is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlDirective {
    pub throttle: Option<f64>,
    pub attitude: AttitudeCommand,
    pub stage_advance: bool,
    pub deploy_gear: bool,
}

impl ControlDirective {
    pub fn throttle(throttle: f64) -> Self {
        ControlDirective {
            throttle: Some(throttle.clamp(0.0, 1.0)),
            ..Self::default()
        }
    }

    pub fn with_attitude(mut self, attitude: AttitudeCommand) -> Self {
        self.attitude = attitude;
        self
    }

    /// Send the directive to the vessel. Call once per directive.
    pub fn apply<C: VesselControl + ?Sized>(&self, control: &mut C) {
        if self.stage_advance {
            debug!("activating next stage");
            control.activate_next_stage();
        }
        match self.attitude {
            AttitudeCommand::Hold => {}
            AttitudeCommand::PitchHeading { pitch, heading } => {
                debug!("attitude target pitch={pitch:.1} heading={heading:.1}");
                control.target_pitch_and_heading(pitch, heading);
            }
            AttitudeCommand::Sas(mode) => control.set_sas_mode(mode),
        }
        if self.deploy_gear {
            control.deploy_gear();
        }
        if let Some(throttle) = self.throttle {
            control.set_throttle(throttle);
        }
    }
}
