use serde::Deserialize;

use crate::config::ConfigError;
use crate::gnc::{AscentConfig, DescentConfig};
use crate::orbital::PhaseSign;
use crate::sequencer::{MissionPhase, TimingConfig};

// ---------------------------------------------------------------------------
// Mission: ordered phase table plus per-mission tuning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    pub name: String,
    pub phases: Vec<MissionPhase>,
    pub ascent: AscentConfig,
    /// Mean altitude (m) to coast to before planning the circularization.
    pub atmosphere_exit_altitude: f64,
    /// Seconds reserved before ignition to reorient after time warp.
    pub lead_time: f64,
    pub target_body: String,
    pub phase_sign: PhaseSign,
    pub descent: DescentConfig,
    pub timing: TimingConfig,
}

impl Default for MissionConfig {
    fn default() -> Self {
        presets::mun_landing()
    }
}

impl MissionConfig {
    /// Reject tables and tunings that cannot fly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.phases.is_empty() {
            return invalid("mission has no phases".into());
        }
        if let Some(w) = self.phases.windows(2).find(|w| w[0] >= w[1]) {
            return invalid(format!("phase {} cannot follow {}", w[1], w[0]));
        }

        let a = &self.ascent;
        let finite = [
            a.turn_start_altitude,
            a.turn_end_altitude,
            a.target_apoapsis,
            self.atmosphere_exit_altitude,
            self.lead_time,
            self.descent.low_altitude,
            self.descent.touchdown_altitude,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return invalid("altitudes and lead time must be finite".into());
        }
        if a.turn_end_altitude <= a.turn_start_altitude {
            return invalid(format!(
                "turn end {} m must lie above turn start {} m",
                a.turn_end_altitude, a.turn_start_altitude
            ));
        }
        if !(a.exit_fraction > 0.0 && a.exit_fraction <= 1.0) {
            return invalid(format!("exit fraction {} outside (0, 1]", a.exit_fraction));
        }
        for (name, factor) in [
            ("throttle damping", a.throttle_damping),
            ("descent throttle factor", self.descent.throttle_factor),
        ] {
            if !(factor > 0.0 && factor < 1.0) {
                return invalid(format!("{name} {factor} outside (0, 1)"));
            }
        }
        if !(a.throttle_floor > 0.0 && a.throttle_floor <= 1.0) {
            return invalid(format!("throttle floor {} outside (0, 1]", a.throttle_floor));
        }
        if self.descent.low_altitude <= self.descent.touchdown_altitude {
            return invalid("low-altitude regime must start above touchdown".into());
        }
        if self.lead_time < 0.0 {
            return invalid("lead time cannot be negative".into());
        }

        let t = &self.timing;
        if !(t.progress_interval_secs.is_finite() && t.progress_interval_secs >= 0.0) {
            return invalid(format!(
                "progress interval {} s must be finite and not negative",
                t.progress_interval_secs
            ));
        }
        if let Some(timeout) = t.timeout_secs {
            if !(timeout.is_finite() && timeout > 0.0) {
                return invalid(format!("timeout {timeout} s must be finite and positive"));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mission builder
// ---------------------------------------------------------------------------

pub struct MissionBuilder {
    config: MissionConfig,
}

impl MissionBuilder {
    /// Start from the full landing mission and adjust from there.
    pub fn new(name: impl Into<String>) -> Self {
        let mut config = presets::mun_landing();
        config.name = name.into();
        Self { config }
    }

    pub fn phases(mut self, phases: impl IntoIterator<Item = MissionPhase>) -> Self {
        self.config.phases = phases.into_iter().collect();
        self
    }

    pub fn ascent(mut self, ascent: AscentConfig) -> Self {
        self.config.ascent = ascent;
        self
    }

    pub fn target_apoapsis(mut self, altitude: f64) -> Self {
        self.config.ascent.target_apoapsis = altitude;
        self
    }

    pub fn target_body(mut self, body: impl Into<String>) -> Self {
        self.config.target_body = body.into();
        self
    }

    pub fn descent(mut self, descent: DescentConfig) -> Self {
        self.config.descent = descent;
        self
    }

    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.config.timing = timing;
        self
    }

    pub fn lead_time(mut self, seconds: f64) -> Self {
        self.config.lead_time = seconds;
        self
    }

    pub fn build(self) -> Result<MissionConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

// ---------------------------------------------------------------------------
// Preset missions
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;
    use crate::sequencer::MissionPhase::*;

    fn base(name: &str, phases: &[MissionPhase]) -> MissionConfig {
        MissionConfig {
            name: name.into(),
            phases: phases.to_vec(),
            ascent: AscentConfig::default(),
            atmosphere_exit_altitude: 70_500.0,
            lead_time: 30.0,
            target_body: "Mun".into(),
            phase_sign: PhaseSign::Leading,
            descent: DescentConfig::default(),
            timing: TimingConfig::default(),
        }
    }

    /// Launch into a circular parking orbit.
    pub fn orbit() -> MissionConfig {
        let mut m = base("Orbit", &[Prelaunch, Ascent, CoastToApoapsis, Circularize1]);
        m.ascent.target_apoapsis = 125_000.0;
        m.ascent.exit_fraction = 0.9;
        m
    }

    /// Parking orbit, Hohmann transfer and capture around the Mun.
    pub fn mun_transfer() -> MissionConfig {
        base(
            "To the Mun",
            &[
                Prelaunch,
                Ascent,
                CoastToApoapsis,
                Circularize1,
                WaitTransferWindow,
                TransferBurn,
                CoastToSoi,
                Circularize2,
            ],
        )
    }

    /// Everything in [`mun_transfer`] followed by a powered landing.
    pub fn mun_landing() -> MissionConfig {
        let mut m = mun_transfer();
        m.name = "Mun landing".into();
        m.phases.extend([Deorbit, HighDescent, LowDescent, Landed]);
        m
    }
}
