pub mod phase;
pub mod predicate;
pub mod progress;
pub mod runner;
pub mod wait;

pub use phase::MissionPhase;
pub use predicate::StopCondition;
pub use progress::ProgressLog;
pub use runner::{BurnTiming, MissionSequencer};
pub use wait::{settle, wait_until, CancelToken, TimingConfig, WaitGuard};
