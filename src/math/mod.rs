pub mod quaternion;
pub mod vector;

pub use quaternion::{
    angle_between_quaternions, quaternion_from_axis_angle, quaternion_from_rotation_vector,
    rotate,
};
pub use vector::{unit, vertical_speed};
