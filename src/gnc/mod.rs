pub mod ascent;
pub mod controller;
pub mod descent;
pub mod guidance;
pub mod throttle;

pub use ascent::{AscentConfig, AscentController, AscentState};
pub use controller::Controller;
pub use descent::{DescentConfig, DescentController, DescentRegime, DescentState};
pub use guidance::{gravity_turn_angle, gravity_turn_pitch};
pub use throttle::{regulate_to_terminal, step_throttle};
