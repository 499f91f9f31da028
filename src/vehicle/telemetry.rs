use nalgebra::Vector3;

use crate::error::{GuidanceError, Result};
use crate::math::vector::vertical_speed;
use crate::orbital::OrbitingBody;

// ---------------------------------------------------------------------------
// Orbit snapshot
// ---------------------------------------------------------------------------

/// Orbital elements of the active vessel around its current parent body.
///
/// Radii are measured from the body centre, times are relative to "now".
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    pub body: String,
    pub mu: f64,                        // m^3/s^2
    pub body_radius: f64,               // m
    pub semi_major_axis: f64,           // m (negative when hyperbolic)
    pub apoapsis: f64,                  // m
    pub periapsis: f64,                 // m
    pub period: f64,                    // s
    pub time_to_apoapsis: f64,          // s
    pub time_to_periapsis: f64,         // s
    pub time_to_soi_change: Option<f64>, // s, None when the orbit never leaves the SOI
}

impl OrbitState {
    pub fn apoapsis_altitude(&self) -> f64 {
        self.apoapsis - self.body_radius
    }

    pub fn periapsis_altitude(&self) -> f64 {
        self.periapsis - self.body_radius
    }
}

// ---------------------------------------------------------------------------
// Vehicle snapshot
// ---------------------------------------------------------------------------

/// Flight and propulsion state of the vessel at one instant.
///
/// `position` and `velocity` are in the body-fixed frame of the parent body.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleState {
    pub mean_altitude: f64,      // m above sea level
    pub surface_altitude: f64,   // m above terrain
    pub speed: f64,              // m/s
    pub terminal_velocity: f64,  // m/s
    pub position: Vector3<f64>,  // m
    pub velocity: Vector3<f64>,  // m/s
    pub available_thrust: f64,   // N
    pub specific_impulse: f64,   // s
    pub mass: f64,               // kg
    pub stage_fuel: f64,         // resource units left in the watched stage
    pub throttle: f64,           // [0, 1]
}

impl VehicleState {
    /// Radial velocity (m/s, positive = climbing), from the raw vectors.
    pub fn vertical_speed(&self) -> Result<f64> {
        vertical_speed(&self.position, &self.velocity)
    }

    /// Rate of descent (m/s, positive = falling).
    pub fn fall_rate(&self) -> Result<f64> {
        Ok(-self.vertical_speed()?)
    }
}

// ---------------------------------------------------------------------------
// Read interface
// ---------------------------------------------------------------------------

/// Read side of the external vessel collaborator.
pub trait VesselTelemetry {
    /// Current universal time (s).
    fn ut(&self) -> f64;

    fn orbit(&self) -> OrbitState;

    fn mean_altitude(&self) -> f64;
    fn surface_altitude(&self) -> f64;
    fn speed(&self) -> f64;
    fn terminal_velocity(&self) -> f64;

    /// Position in the parent body's rotating, body-fixed frame.
    fn position(&self) -> Vector3<f64>;
    /// Velocity in the parent body's rotating, body-fixed frame.
    fn velocity(&self) -> Vector3<f64>;

    fn mass(&self) -> f64;
    fn available_thrust(&self) -> f64;
    fn specific_impulse(&self) -> f64;
    fn throttle(&self) -> f64;

    /// Delta-v (m/s) still to apply along the active node's burn direction.
    /// Zero or negative once the burn is complete, or when no node exists.
    fn remaining_burn(&self) -> f64;

    /// Amount of `resource` held by the parts that decouple with `stage`.
    fn resource_amount(&self, stage: i32, resource: &str) -> f64;

    /// The vessel (`None`) or a named body, in the non-rotating frame of the
    /// body the vessel currently orbits. `None` for bodies it does not know.
    fn orbiting_state(&self, body: Option<&str>) -> Option<OrbitingBody>;
}

/// Which stage resource a controller watches.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelProbe {
    pub stage: i32,
    pub resource: String,
}

/// One consistent read of the vessel, taken once per control tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub ut: f64,
    pub vehicle: VehicleState,
    pub orbit: OrbitState,
}

impl Snapshot {
    /// Read everything a controller may need. `stage_fuel` is 0 without a probe.
    pub fn capture<T: VesselTelemetry + ?Sized>(vessel: &T, probe: Option<&FuelProbe>) -> Self {
        let stage_fuel = probe
            .map(|p| vessel.resource_amount(p.stage, &p.resource))
            .unwrap_or(0.0);
        Snapshot {
            ut: vessel.ut(),
            vehicle: VehicleState {
                mean_altitude: vessel.mean_altitude(),
                surface_altitude: vessel.surface_altitude(),
                speed: vessel.speed(),
                terminal_velocity: vessel.terminal_velocity(),
                position: vessel.position(),
                velocity: vessel.velocity(),
                available_thrust: vessel.available_thrust(),
                specific_impulse: vessel.specific_impulse(),
                mass: vessel.mass(),
                stage_fuel,
                throttle: vessel.throttle(),
            },
            orbit: vessel.orbit(),
        }
    }
}

/// Look up the vessel and a named body for phase-angle work.
pub fn phase_pair<T: VesselTelemetry + ?Sized>(
    vessel: &T,
    target: &str,
) -> Result<(OrbitingBody, OrbitingBody)> {
    let own = vessel
        .orbiting_state(None)
        .ok_or_else(|| GuidanceError::UnknownBody("active vessel".into()))?;
    let body = vessel
        .orbiting_state(Some(target))
        .ok_or_else(|| GuidanceError::UnknownBody(target.to_string()))?;
    Ok((own, body))
}
