use std::time::Duration;

use thiserror::Error;

use crate::sequencer::MissionPhase;

/// Failures raised by the guidance math, the planners and the sequencer.
///
/// None of these are retried: they indicate a logic or configuration fault,
/// so the active mission phase aborts and the error propagates to the caller.
#[derive(Debug, Error)]
pub enum GuidanceError {
    /// A vector with zero (or non-finite) magnitude had to be normalized.
    #[error("cannot normalize a degenerate vector")]
    DegenerateVector,
    /// A trigonometric or square-root argument left its valid domain.
    #[error("numeric input {value} is outside the valid domain")]
    NumericDomain { value: f64 },
    /// Both bodies sweep the same angle per second, so no window ever opens.
    #[error("relative angular rate is zero, the transfer window never occurs")]
    StationaryTarget,
    /// Burn duration is undefined without positive thrust.
    #[error("available thrust {thrust} N cannot perform a burn")]
    InsufficientThrust { thrust: f64 },
    /// Telemetry does not know about the requested body.
    #[error("body '{0}' is not reported by vessel telemetry")]
    UnknownBody(String),
    /// The transfer orbit never leaves the current sphere of influence.
    #[error("trajectory never reaches {body}")]
    NoEncounter { body: String },
    /// A wait loop observed its cancellation token.
    #[error("wait cancelled")]
    Cancelled,
    /// A wait loop exceeded the configured timeout.
    #[error("phase {phase} timed out after {after:?}")]
    TimedOut { phase: MissionPhase, after: Duration },
    /// A planning failure that aborted the named phase.
    #[error("phase {phase} aborted: {source}")]
    Phase {
        phase: MissionPhase,
        #[source]
        source: Box<GuidanceError>,
    },
}

impl GuidanceError {
    /// Attach the phase that was running when `self` was raised.
    pub fn in_phase(self, phase: MissionPhase) -> Self {
        match self {
            // already carries its phase, or is not a fault of the phase
            err @ (GuidanceError::Phase { .. }
            | GuidanceError::TimedOut { .. }
            | GuidanceError::Cancelled) => err,
            err => GuidanceError::Phase {
                phase,
                source: Box::new(err),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, GuidanceError>;
