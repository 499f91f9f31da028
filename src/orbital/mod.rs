pub mod bodies;
pub mod maneuvers;
pub mod phase;

pub use bodies::Body;
pub use maneuvers::{
    burn_duration, circularization_delta_v, hohmann, HohmannTransfer, ManeuverPlan, BURN_G0,
};
pub use phase::{
    angle_between, hohmann_phase_angle, time_to_phase, time_until_phase, OrbitingBody, PhaseSign,
};
