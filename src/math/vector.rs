use nalgebra::Vector3;

use crate::error::{GuidanceError, Result};

/// Normalize `v`, refusing zero or non-finite magnitudes.
pub fn unit(v: &Vector3<f64>) -> Result<Vector3<f64>> {
    let mag = v.norm();
    if mag == 0.0 || !mag.is_finite() {
        return Err(GuidanceError::DegenerateVector);
    }
    Ok(v / mag)
}

/// Velocity component along the outward radial direction (m/s, positive = climbing).
///
/// Both vectors must be in the same body-fixed frame centred on the body.
/// Recompute every tick: position and velocity both move.
pub fn vertical_speed(position: &Vector3<f64>, velocity: &Vector3<f64>) -> Result<f64> {
    Ok(velocity.dot(&unit(position)?))
}
