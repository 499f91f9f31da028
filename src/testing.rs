//! Snapshot fixtures shared by the unit tests.

use nalgebra::Vector3;

use crate::orbital::bodies::KERBIN;
use crate::vehicle::{OrbitState, Snapshot, VehicleState};

/// A vessel hovering over Kerbin at `altitude` with the given apoapsis altitude.
pub fn snapshot(altitude: f64, apoapsis_altitude: f64) -> Snapshot {
    let r = KERBIN.radius + altitude;
    Snapshot {
        ut: 0.0,
        vehicle: VehicleState {
            mean_altitude: altitude,
            surface_altitude: altitude,
            speed: 0.0,
            terminal_velocity: f64::INFINITY,
            position: Vector3::new(r, 0.0, 0.0),
            velocity: Vector3::zeros(),
            available_thrust: 200_000.0,
            specific_impulse: 300.0,
            mass: 20_000.0,
            stage_fuel: 0.0,
            throttle: 0.0,
        },
        orbit: OrbitState {
            body: KERBIN.name.into(),
            mu: KERBIN.mu,
            body_radius: KERBIN.radius,
            semi_major_axis: (2.0 * KERBIN.radius + apoapsis_altitude) / 2.0,
            apoapsis: KERBIN.radius + apoapsis_altitude,
            periapsis: 0.0,
            period: 0.0,
            time_to_apoapsis: 0.0,
            time_to_periapsis: 0.0,
            time_to_soi_change: None,
        },
    }
}

/// A vessel descending radially at `fall_rate` m/s from `altitude` above the surface.
pub fn falling(altitude: f64, fall_rate: f64) -> Snapshot {
    let mut s = snapshot(altitude, altitude);
    s.vehicle.velocity = Vector3::new(-fall_rate, 0.0, 0.0);
    s.vehicle.speed = fall_rate.abs();
    s
}
