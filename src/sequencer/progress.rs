use std::time::{Duration, Instant};

/// Rate limiter for progress lines printed from tight polling loops.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    interval: Duration,
    last: Instant,
}

impl ProgressLog {
    /// The first line becomes due one `interval` after creation.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    /// True at most once per interval of wall time.
    pub fn due(&mut self) -> bool {
        let now = Instant::now();
        if now.duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}
