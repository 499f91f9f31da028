use log::info;
use serde::Deserialize;

use super::guidance::gravity_turn_angle;
use super::throttle::regulate_to_terminal;
use crate::error::Result;
use crate::vehicle::{AttitudeCommand, ControlDirective, FuelProbe, Snapshot};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for the atmospheric ascent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AscentConfig {
    pub turn_start_altitude: f64,  // m
    pub turn_end_altitude: f64,    // m
    pub heading: f64,              // deg
    pub target_apoapsis: f64,      // m altitude
    /// Fraction of `target_apoapsis` at which the closed loop hands over.
    pub exit_fraction: f64,
    /// Decouple stage holding the boosters, `None` for a liquid-only ascent.
    pub srb_stage: Option<i32>,
    pub srb_resource: String,
    pub separation_threshold: f64,
    pub post_separation_throttle: f64,
    pub throttle_floor: f64,
    pub throttle_damping: f64,
    /// Attitude re-targets smaller than this (deg) are not sent.
    pub attitude_deadband: f64,
    /// Throttle used to top the apoapsis up after the loop exits.
    pub coast_throttle: f64,
}

impl Default for AscentConfig {
    fn default() -> Self {
        Self {
            turn_start_altitude: 8_000.0,
            turn_end_altitude: 45_000.0,
            heading: 90.0,
            target_apoapsis: 80_000.0,
            exit_fraction: 0.95,
            srb_stage: Some(6),
            srb_resource: "SolidFuel".into(),
            separation_threshold: 0.1,
            post_separation_throttle: 0.05,
            throttle_floor: 0.05,
            throttle_damping: 0.9,
            attitude_deadband: 0.5,
            coast_throttle: 0.25,
        }
    }
}

impl AscentConfig {
    /// Progress through the climb, 1.0 at the target apoapsis.
    pub fn apoapsis_fraction(&self, apoapsis_altitude: f64) -> f64 {
        apoapsis_altitude / self.target_apoapsis
    }

    pub fn fuel_probe(&self) -> Option<FuelProbe> {
        self.srb_stage.map(|stage| FuelProbe {
            stage,
            resource: self.srb_resource.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AscentState {
    pub turn_angle: f64, // deg from vertical, last commanded
    pub srbs_separated: bool,
    /// Regulated throttle, only sent to the vessel once the boosters are gone.
    pub desired_throttle: f64,
}

/// Gravity turn with booster separation and throttle held near terminal velocity.
#[derive(Debug, Clone)]
pub struct AscentController {
    pub config: AscentConfig,
    pub state: AscentState,
}

impl AscentController {
    pub fn new(config: AscentConfig) -> Self {
        let state = Self::initial_state(&config);
        Self { config, state }
    }

    fn initial_state(config: &AscentConfig) -> AscentState {
        AscentState {
            turn_angle: 0.0,
            // without boosters the throttle loop runs from lift-off
            srbs_separated: config.srb_stage.is_none(),
            desired_throttle: config.throttle_floor,
        }
    }

    /// Apoapsis altitude at which the closed-loop ascent ends.
    pub fn exit_apoapsis(&self) -> f64 {
        self.config.exit_fraction * self.config.target_apoapsis
    }

    fn steer(&mut self, altitude: f64) -> AttitudeCommand {
        let c = &self.config;
        let angle = gravity_turn_angle(altitude, c.turn_start_altitude, c.turn_end_altitude);
        if (angle - self.state.turn_angle).abs() > c.attitude_deadband {
            self.state.turn_angle = angle;
            AttitudeCommand::PitchHeading {
                pitch: 90.0 - angle,
                heading: c.heading,
            }
        } else {
            AttitudeCommand::Hold
        }
    }

    fn check_separation(&mut self, stage_fuel: f64) -> bool {
        if self.state.srbs_separated || stage_fuel >= self.config.separation_threshold {
            return false;
        }
        self.state.srbs_separated = true;
        self.state.desired_throttle = self.config.post_separation_throttle;
        info!("SRBs separated");
        true
    }
}

impl super::Controller for AscentController {
    fn control(&mut self, snapshot: &Snapshot) -> Result<ControlDirective> {
        let v = &snapshot.vehicle;
        let attitude = self.steer(v.mean_altitude);
        let stage_advance = self.check_separation(v.stage_fuel);

        let mut directive = if self.state.srbs_separated {
            let c = &self.config;
            self.state.desired_throttle = regulate_to_terminal(
                self.state.desired_throttle,
                v.speed,
                v.terminal_velocity,
                c.throttle_damping,
                c.throttle_floor,
            );
            ControlDirective::throttle(self.state.desired_throttle)
        } else {
            // boosters fly on their own, the main engine stays at its pad setting
            ControlDirective::default()
        };
        directive.attitude = attitude;
        directive.stage_advance = stage_advance;
        Ok(directive)
    }

    fn finished(&self, snapshot: &Snapshot) -> bool {
        snapshot.orbit.apoapsis_altitude() >= self.exit_apoapsis()
    }

    fn reset(&mut self) {
        self.state = Self::initial_state(&self.config);
    }

    fn name(&self) -> &str {
        "AscentController"
    }
}
