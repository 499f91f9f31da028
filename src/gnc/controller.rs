use crate::error::Result;
use crate::vehicle::{ControlDirective, Snapshot};

/// Trait for closed-loop flight controllers.
///
/// A controller owns its state explicitly and sees the vessel only through
/// one [`Snapshot`] per tick, so it can be stepped without a live vessel.
pub trait Controller {
    /// Compute this tick's directive from a consistent snapshot.
    fn control(&mut self, snapshot: &Snapshot) -> Result<ControlDirective>;

    /// Phase-exit predicate, evaluated on the snapshot before `control`.
    fn finished(&self, snapshot: &Snapshot) -> bool;

    /// Reset internal state to its initial values.
    fn reset(&mut self) {}

    /// Human-readable name for logging.
    fn name(&self) -> &str {
        "unnamed"
    }
}
