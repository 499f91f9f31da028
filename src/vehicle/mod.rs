pub mod control;
pub mod mission;
pub mod telemetry;

pub use control::{AttitudeCommand, ControlDirective, SasMode, Vessel, VesselControl};
pub use mission::{presets, MissionBuilder, MissionConfig};
pub use telemetry::{phase_pair, FuelProbe, OrbitState, Snapshot, VehicleState, VesselTelemetry};
