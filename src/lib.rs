pub mod config;
pub mod error;
pub mod gnc;
pub mod math;
pub mod orbital;
pub mod sequencer;
pub mod vehicle;

#[cfg(test)]
mod testing;

pub use error::{GuidanceError, Result};
