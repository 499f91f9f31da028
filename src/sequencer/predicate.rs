use std::fmt;

use crate::vehicle::VesselTelemetry;

// ---------------------------------------------------------------------------
// Stop conditions
// ---------------------------------------------------------------------------

/// Telemetry thresholds that end a wait loop.
#[derive(Debug, Clone, PartialEq)]
pub enum StopCondition {
    /// Apoapsis altitude at or above the value (m).
    ApoapsisAbove(f64),
    /// Mean altitude at or above the value (m).
    AltitudeAbove(f64),
    /// Periapsis altitude at or below the value (m).
    PeriapsisBelow(f64),
    /// The vessel orbits the named body.
    InSoiOf(String),
    /// Universal time at or past the value (s).
    UtReached(f64),
    /// Nothing left to burn on the active maneuver node.
    NodeBurnComplete,
}

impl StopCondition {
    pub fn check<T: VesselTelemetry + ?Sized>(&self, vessel: &T) -> bool {
        match self {
            StopCondition::ApoapsisAbove(alt) => vessel.orbit().apoapsis_altitude() >= *alt,
            StopCondition::AltitudeAbove(alt) => vessel.mean_altitude() >= *alt,
            StopCondition::PeriapsisBelow(alt) => vessel.orbit().periapsis_altitude() <= *alt,
            StopCondition::InSoiOf(body) => vessel.orbit().body == *body,
            StopCondition::UtReached(ut) => vessel.ut() >= *ut,
            StopCondition::NodeBurnComplete => vessel.remaining_burn() <= 0.0,
        }
    }
}

impl fmt::Display for StopCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StopCondition::ApoapsisAbove(alt) => write!(f, "apoapsis >= {alt:.0} m"),
            StopCondition::AltitudeAbove(alt) => write!(f, "altitude >= {alt:.0} m"),
            StopCondition::PeriapsisBelow(alt) => write!(f, "periapsis <= {alt:.0} m"),
            StopCondition::InSoiOf(body) => write!(f, "inside {body} SOI"),
            StopCondition::UtReached(ut) => write!(f, "ut >= {ut:.1} s"),
            StopCondition::NodeBurnComplete => write!(f, "node burn complete"),
        }
    }
}
