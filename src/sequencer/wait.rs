use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::debug;
use serde::Deserialize;

use super::phase::MissionPhase;
use crate::error::{GuidanceError, Result};

// ---------------------------------------------------------------------------
// Timing configuration
// ---------------------------------------------------------------------------

/// Poll rates, settle delays and the optional wait timeout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub poll_interval_ms: u64,
    /// Finer poll used by the landing loop.
    pub descent_poll_interval_ms: u64,
    /// Pause after a mode change so the vessel can engage it.
    pub settle_ms: u64,
    /// Number of countdown steps before launch.
    pub countdown: u32,
    pub countdown_step_ms: u64,
    /// Abort any single wait after this many seconds. `None` waits forever.
    pub timeout_secs: Option<f64>,
    pub progress_interval_secs: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            descent_poll_interval_ms: 10,
            settle_ms: 100,
            countdown: 3,
            countdown_step_ms: 1_000,
            timeout_secs: None,
            progress_interval_secs: 10.0,
        }
    }
}

impl TimingConfig {
    /// Zero delays, for replaying scripted telemetry.
    pub fn immediate() -> Self {
        Self {
            poll_interval_ms: 0,
            descent_poll_interval_ms: 0,
            settle_ms: 0,
            countdown: 0,
            countdown_step_ms: 0,
            timeout_secs: None,
            progress_interval_secs: 0.0,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn descent_poll_interval(&self) -> Duration {
        Duration::from_millis(self.descent_poll_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn countdown_step(&self) -> Duration {
        Duration::from_millis(self.countdown_step_ms)
    }

    /// Values that are not a valid duration (negative, NaN, overflowing)
    /// mean no timeout. `MissionConfig::validate` rejects them up front.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// An invalid interval falls back to zero, logging on every tick.
    pub fn progress_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.progress_interval_secs).unwrap_or(Duration::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

/// Shared flag that stops every wait loop holding a clone of it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// Bounded polling
// ---------------------------------------------------------------------------

/// Deadline and cancellation bookkeeping for one wait loop.
#[derive(Debug)]
pub struct WaitGuard<'a> {
    phase: MissionPhase,
    started: Instant,
    timeout: Option<Duration>,
    cancel: &'a CancelToken,
}

impl<'a> WaitGuard<'a> {
    pub fn new(phase: MissionPhase, timeout: Option<Duration>, cancel: &'a CancelToken) -> Self {
        Self {
            phase,
            started: Instant::now(),
            timeout,
            cancel,
        }
    }

    /// Fail if the loop was cancelled or ran past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(GuidanceError::Cancelled);
        }
        let after = self.started.elapsed();
        match self.timeout {
            Some(limit) if after > limit => Err(GuidanceError::TimedOut {
                phase: self.phase,
                after,
            }),
            _ => Ok(()),
        }
    }
}

/// Poll `done` every `poll` until it holds, honouring cancellation and timeout.
pub fn wait_until<F>(
    phase: MissionPhase,
    poll: Duration,
    timeout: Option<Duration>,
    cancel: &CancelToken,
    mut done: F,
) -> Result<()>
where
    F: FnMut() -> bool,
{
    let guard = WaitGuard::new(phase, timeout, cancel);
    loop {
        guard.check()?;
        if done() {
            return Ok(());
        }
        if !poll.is_zero() {
            thread::sleep(poll);
        }
    }
}

/// Fixed delay after a mode change. Not cancellable.
pub fn settle(delay: Duration) {
    if !delay.is_zero() {
        debug!("settling for {delay:?}");
        thread::sleep(delay);
    }
}
