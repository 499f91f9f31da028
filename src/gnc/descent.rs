use log::info;
use serde::Deserialize;

use super::throttle::step_throttle;
use crate::error::Result;
use crate::vehicle::{ControlDirective, Snapshot};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Tuning for the deorbit burn and the powered landing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DescentConfig {
    /// Periapsis altitude (m) the deorbit burn lowers the orbit to.
    pub deorbit_periapsis: f64,
    /// Boundary between the high and low regimes (m).
    pub low_altitude: f64,
    /// Altitude (m) at which the vessel counts as landed.
    pub touchdown_altitude: f64,
    /// High regime: falling faster than this (m/s) ...
    pub max_fall_rate: f64,
    /// ... with less than this many seconds to impact is too fast.
    pub min_time_to_crash: f64,
    /// Target fall rate (m/s) at touchdown altitude; rises to `max_fall_rate` at `low_altitude`.
    pub touchdown_fall_rate: f64,
    /// Geometric throttle step (< 1).
    pub throttle_factor: f64,
    /// Throttle values under this snap to 0.
    pub min_throttle: f64,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            deorbit_periapsis: 5_000.0,
            low_altitude: 100.0,
            touchdown_altitude: 5.0,
            max_fall_rate: 20.0,
            min_time_to_crash: 50.0,
            touchdown_fall_rate: 2.0,
            throttle_factor: 0.97,
            min_throttle: 0.05,
        }
    }
}

impl DescentConfig {
    /// Seconds until impact at the current fall rate; infinite when not falling.
    pub fn time_to_crash(altitude: f64, fall_rate: f64) -> f64 {
        if fall_rate > 0.0 {
            altitude / fall_rate
        } else {
            f64::INFINITY
        }
    }

    /// High regime: both falling fast and close to impact.
    pub fn high_altitude_too_fast(&self, altitude: f64, fall_rate: f64) -> bool {
        fall_rate > self.max_fall_rate && Self::time_to_crash(altitude, fall_rate) < self.min_time_to_crash
    }

    /// Allowed fall rate (m/s) at `altitude`, linear between the touchdown and
    /// low-altitude boundaries and clamped outside them.
    pub fn target_fall_rate(&self, altitude: f64) -> f64 {
        let span = self.low_altitude - self.touchdown_altitude;
        let frac = ((altitude - self.touchdown_altitude) / span).clamp(0.0, 1.0);
        self.touchdown_fall_rate + frac * (self.max_fall_rate - self.touchdown_fall_rate)
    }

    pub fn low_altitude_too_fast(&self, altitude: f64, fall_rate: f64) -> bool {
        fall_rate > self.target_fall_rate(altitude)
    }

    pub fn regime(&self, altitude: f64) -> DescentRegime {
        if altitude <= self.touchdown_altitude {
            DescentRegime::Landed
        } else if altitude <= self.low_altitude {
            DescentRegime::Low
        } else {
            DescentRegime::High
        }
    }

    /// Whether the vessel must brake harder at this altitude and fall rate.
    pub fn too_fast(&self, altitude: f64, fall_rate: f64) -> bool {
        match self.regime(altitude) {
            DescentRegime::High => self.high_altitude_too_fast(altitude, fall_rate),
            DescentRegime::Low => self.low_altitude_too_fast(altitude, fall_rate),
            DescentRegime::Landed => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentRegime {
    High,
    Low,
    Landed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescentState {
    pub throttle: f64,
    pub regime: DescentRegime,
}

impl Default for DescentState {
    fn default() -> Self {
        Self {
            throttle: 0.0,
            regime: DescentRegime::High,
        }
    }
}

/// Throttle-only landing loop: brake whenever the fall is too fast for the altitude.
#[derive(Debug, Clone)]
pub struct DescentController {
    pub config: DescentConfig,
    pub state: DescentState,
}

impl DescentController {
    pub fn new(config: DescentConfig) -> Self {
        Self {
            config,
            state: DescentState::default(),
        }
    }

    pub fn landed(&self) -> bool {
        self.state.regime == DescentRegime::Landed
    }
}

impl super::Controller for DescentController {
    fn control(&mut self, snapshot: &Snapshot) -> Result<ControlDirective> {
        let altitude = snapshot.vehicle.surface_altitude;
        let regime = self.config.regime(altitude);

        if regime == DescentRegime::Landed {
            let touching_down = !self.landed();
            self.state = DescentState {
                throttle: 0.0,
                regime,
            };
            if touching_down {
                info!("touchdown at {altitude:.1} m, gear down");
            }
            let mut directive = ControlDirective::throttle(0.0);
            directive.deploy_gear = touching_down;
            return Ok(directive);
        }

        if regime != self.state.regime {
            info!("descent regime {:?} -> {:?} at {altitude:.0} m", self.state.regime, regime);
        }
        // vectors move every tick, so the fall rate is never cached
        let fall_rate = snapshot.vehicle.fall_rate()?;
        let too_fast = self.config.too_fast(altitude, fall_rate);

        let c = &self.config;
        self.state.throttle = step_throttle(self.state.throttle, too_fast, c.throttle_factor, c.min_throttle);
        self.state.regime = regime;
        Ok(ControlDirective::throttle(self.state.throttle))
    }

    /// Only after the touchdown tick, so the gear directive is always issued.
    fn finished(&self, _snapshot: &Snapshot) -> bool {
        self.landed()
    }

    fn reset(&mut self) {
        self.state = DescentState::default();
    }

    fn name(&self) -> &str {
        "DescentController"
    }
}
