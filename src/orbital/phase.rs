use std::f64::consts::{PI, TAU};

use nalgebra::Vector3;
use serde::Deserialize;

use crate::error::{GuidanceError, Result};
use crate::math::vector::unit;

// ---------------------------------------------------------------------------
// Orbiting bodies and phase sign convention
// ---------------------------------------------------------------------------

/// Position, velocity and period of something orbiting a common parent.
///
/// Vectors are expressed in the parent's non-rotating frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitingBody {
    pub position: Vector3<f64>, // m
    pub velocity: Vector3<f64>, // m/s
    pub period: f64,            // s
}

impl OrbitingBody {
    /// Mean angular rate `2π / period` (rad/s).
    pub fn angular_rate(&self) -> Result<f64> {
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(GuidanceError::NumericDomain { value: self.period });
        }
        Ok(TAU / self.period)
    }
}

/// Which relative geometry counts as a positive phase angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSign {
    /// Positive when the second body leads the first along its orbital motion.
    #[default]
    Leading,
    /// Positive when the second body trails the first.
    Trailing,
}

// ---------------------------------------------------------------------------
// Phase angle
// ---------------------------------------------------------------------------

/// Signed angle (rad, in `(-π, π]`) from `a` to `b` about `a`'s orbit normal.
///
/// Coincident positions return exactly 0.
pub fn angle_between(a: &OrbitingBody, b: &OrbitingBody, sign: PhaseSign) -> Result<f64> {
    let pa = unit(&a.position)?;
    let pb = unit(&b.position)?;
    if pa == pb {
        return Ok(0.0);
    }
    let normal = a.position.cross(&a.velocity);

    let angle = pa.dot(&pb).clamp(-1.0, 1.0).acos();
    let side = pa.cross(&pb).dot(&normal);
    let leading = side >= 0.0;

    let angle = match (sign, leading) {
        (PhaseSign::Leading, true) | (PhaseSign::Trailing, false) => angle,
        _ => -angle,
    };
    // keep the half-open range when the sign flip lands on -π
    if angle <= -PI {
        Ok(PI)
    } else {
        Ok(angle)
    }
}

// ---------------------------------------------------------------------------
// Transfer window timing
// ---------------------------------------------------------------------------

/// Seconds until a phase angle drifting at `relative_rate` (rad/s) reaches
/// `target` (rad, taken modulo 2π).
///
/// The residual is wrapped into one revolution in the direction of the drift,
/// so the answer is the first future crossing and is 0 when already there.
pub fn time_to_phase(current: f64, relative_rate: f64, target: f64) -> Result<f64> {
    if relative_rate == 0.0 {
        return Err(GuidanceError::StationaryTarget);
    }
    if !relative_rate.is_finite() {
        return Err(GuidanceError::NumericDomain { value: relative_rate });
    }

    let mut delta = (target - current).rem_euclid(TAU);
    if delta >= TAU {
        delta -= TAU;
    }
    if relative_rate < 0.0 && delta > 0.0 {
        delta -= TAU;
    }
    Ok(delta / relative_rate)
}

/// Seconds until the phase angle from `a` to `b` equals `target`.
///
/// `a` is the chaser; the relative rate is `ω_b − ω_a`.
pub fn time_until_phase(
    a: &OrbitingBody,
    b: &OrbitingBody,
    target: f64,
    sign: PhaseSign,
) -> Result<f64> {
    let current = angle_between(a, b, sign)?;
    let rate = b.angular_rate()? - a.angular_rate()?;
    // the rate is measured in the Leading sense
    let rate = match sign {
        PhaseSign::Leading => rate,
        PhaseSign::Trailing => -rate,
    };
    time_to_phase(current, rate, target)
}

/// Phase angle (rad) the target must lead by when a Hohmann transfer from
/// radius `r1` to radius `r2` begins.
pub fn hohmann_phase_angle(r1: f64, r2: f64) -> f64 {
    PI * (1.0 - ((r1 + r2) / (2.0 * r2)).powf(1.5))
}
