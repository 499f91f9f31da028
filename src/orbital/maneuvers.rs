use log::debug;

use crate::error::{GuidanceError, Result};

/// Standard gravity used to turn specific impulse into exhaust velocity, m/s^2.
pub const BURN_G0: f64 = 9.82;

// ---------------------------------------------------------------------------
// Vis-viva
// ---------------------------------------------------------------------------

/// Orbital speed at radius `r` on an orbit with semi-major axis `a` (m/s).
pub fn vis_viva(mu: f64, r: f64, a: f64) -> Result<f64> {
    let energy_term = mu * (2.0 / r - 1.0 / a);
    if !(energy_term >= 0.0) || !energy_term.is_finite() {
        return Err(GuidanceError::NumericDomain { value: energy_term });
    }
    Ok(energy_term.sqrt())
}

/// Prograde delta-v (m/s) that changes the orbit through radius `r_target`
/// from semi-major axis `a_current` to `a_target`.
///
/// Circularizing at an apsis uses `a_target = r_target`. The sign is kept:
/// a negative result is a retrograde burn.
pub fn circularization_delta_v(mu: f64, r_target: f64, a_current: f64, a_target: f64) -> Result<f64> {
    let v1 = vis_viva(mu, r_target, a_current)?;
    let v2 = vis_viva(mu, r_target, a_target)?;
    Ok(v2 - v1)
}

// ---------------------------------------------------------------------------
// Rocket equation
// ---------------------------------------------------------------------------

/// Seconds of full thrust needed for `delta_v`, using [`BURN_G0`].
pub fn burn_duration(delta_v: f64, thrust: f64, isp: f64, mass: f64) -> Result<f64> {
    burn_duration_g0(delta_v, thrust, isp, mass, BURN_G0)
}

/// Rocket-equation burn time with explicit standard gravity.
pub fn burn_duration_g0(delta_v: f64, thrust: f64, isp: f64, mass: f64, g0: f64) -> Result<f64> {
    if !(thrust > 0.0) {
        return Err(GuidanceError::InsufficientThrust { thrust });
    }
    let exhaust_velocity = isp * g0;
    if !(exhaust_velocity > 0.0) {
        return Err(GuidanceError::NumericDomain { value: exhaust_velocity });
    }
    let m1 = mass / (delta_v.abs() / exhaust_velocity).exp();
    let flow_rate = thrust / exhaust_velocity;
    Ok((mass - m1) / flow_rate)
}

// ---------------------------------------------------------------------------
// Maneuver plans
// ---------------------------------------------------------------------------

/// A planned impulsive burn, centred on `epoch`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManeuverPlan {
    pub epoch: f64,            // s, universal time of the burn midpoint
    pub prograde_delta_v: f64, // m/s, negative = retrograde
    pub burn_duration: f64,    // s
}

impl ManeuverPlan {
    /// Plan a burn at `epoch`, sizing it for the given engine and mass.
    pub fn new(epoch: f64, prograde_delta_v: f64, thrust: f64, isp: f64, mass: f64) -> Result<Self> {
        let burn_duration = burn_duration(prograde_delta_v, thrust, isp, mass)?;
        debug!(
            "maneuver at t={:.1}s: dv={:.1} m/s, burn={:.1}s",
            epoch, prograde_delta_v, burn_duration
        );
        Ok(ManeuverPlan { epoch, prograde_delta_v, burn_duration })
    }

    /// Universal time at which the engine must light.
    pub fn ignition(&self) -> f64 {
        self.epoch - self.burn_duration / 2.0
    }

    /// Universal time to warp to, leaving `lead_time` to reorient.
    pub fn warp_target(&self, lead_time: f64) -> f64 {
        self.ignition() - lead_time
    }

    pub fn is_retrograde(&self) -> bool {
        self.prograde_delta_v < 0.0
    }
}

// ---------------------------------------------------------------------------
// Hohmann transfer summary
// ---------------------------------------------------------------------------

/// Result of a Hohmann transfer calculation between circular orbits.
#[derive(Debug, Clone, Copy)]
pub struct HohmannTransfer {
    pub dv1: f64,           // m/s, first burn (raise apoapsis)
    pub dv2: f64,           // m/s, second burn (circularize)
    pub total_dv: f64,      // m/s, total delta-v
    pub transfer_time: f64, // s, half the transfer orbit period
    pub phase_angle: f64,   // rad, target lead at departure
    pub r1: f64,            // m, initial orbit radius
    pub r2: f64,            // m, final orbit radius
}

/// Compute a Hohmann transfer from radius `r1` to radius `r2` around a body
/// with gravitational parameter `mu`.
pub fn hohmann(r1: f64, r2: f64, mu: f64) -> Result<HohmannTransfer> {
    let a_transfer = (r1 + r2) / 2.0;

    // departure raises apoapsis, arrival raises periapsis
    let dv1 = circularization_delta_v(mu, r1, r1, a_transfer)?.abs();
    let dv2 = circularization_delta_v(mu, r2, a_transfer, r2)?.abs();

    let transfer_time = std::f64::consts::PI * (a_transfer.powi(3) / mu).sqrt();

    Ok(HohmannTransfer {
        dv1,
        dv2,
        total_dv: dv1 + dv2,
        transfer_time,
        phase_angle: super::phase::hohmann_phase_angle(r1, r2),
        r1,
        r2,
    })
}
