use nalgebra::{Quaternion, Vector3};

use crate::error::{GuidanceError, Result};

/// How far a norm may drift from 1 before it counts as a caller bug.
pub const UNIT_TOLERANCE: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Rotation of `angle` radians about `axis`.
///
/// `axis` must already be unit length; a non-unit axis is rejected rather than
/// silently renormalized.
pub fn quaternion_from_axis_angle(axis: &Vector3<f64>, angle: f64) -> Result<Quaternion<f64>> {
    let mag = axis.norm();
    if !mag.is_finite() || (mag - 1.0).abs() > UNIT_TOLERANCE {
        return Err(GuidanceError::DegenerateVector);
    }
    let (s, c) = (angle / 2.0).sin_cos();
    Ok(Quaternion::new(c, axis.x * s, axis.y * s, axis.z * s))
}

/// Rotation encoded as a vector: direction is the axis, magnitude the angle (rad).
pub fn quaternion_from_rotation_vector(vec: &Vector3<f64>) -> Result<Quaternion<f64>> {
    let angle = vec.norm();
    let axis = super::vector::unit(vec)?;
    quaternion_from_axis_angle(&axis, angle)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Rotate `v` by `q`: vector part of `q * (v, 0) * conj(q)`.
pub fn rotate(q: &Quaternion<f64>, v: &Vector3<f64>) -> Vector3<f64> {
    (q * Quaternion::from_imag(*v) * q.conjugate()).imag()
}

/// Angle (rad) of the rotation taking `q1` to `q2`.
///
/// Both inputs must be unit quaternions. Floating overshoot of the `acos`
/// argument is clamped, but a norm that is visibly off is reported as
/// [`GuidanceError::NumericDomain`].
pub fn angle_between_quaternions(q1: &Quaternion<f64>, q2: &Quaternion<f64>) -> Result<f64> {
    for q in [q1, q2] {
        let n = q.norm();
        if !n.is_finite() || (n - 1.0).abs() > UNIT_TOLERANCE {
            return Err(GuidanceError::NumericDomain { value: n });
        }
    }
    let d = q1.dot(q2);
    Ok((2.0 * d * d - 1.0).clamp(-1.0, 1.0).acos())
}
