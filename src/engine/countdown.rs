//! Pre-roll countdown.

use std::time::Duration;

/// Whether a countdown is still running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Time remains.
    Running,
    /// The countdown reached zero.
    Expired,
}

/// A countdown of whole seconds, ticked by elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
}

impl Countdown {
    /// Start a countdown of `seconds`.
    pub fn start(seconds: u32) -> Self {
        Self {
            remaining: Duration::from_secs(u64::from(seconds)),
        }
    }

    /// Consume elapsed time.
    pub fn tick(&mut self, elapsed: Duration) -> CountdownStatus {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            CountdownStatus::Expired
        } else {
            CountdownStatus::Running
        }
    }

    /// Time left.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whole seconds left, rounded up, as shown on screen.
    ///
    /// ```
    /// use std::time::Duration;
    /// use tprompt::engine::countdown::Countdown;
    ///
    /// let mut c = Countdown::start(3);
    /// c.tick(Duration::from_millis(400));
    /// assert_eq!(c.remaining_seconds(), 3);
    /// ```
    pub fn remaining_seconds(&self) -> u32 {
        let secs = self.remaining.as_secs();
        let rounded = if self.remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        };
        u32::try_from(rounded).unwrap_or(u32::MAX)
    }

    /// Discard the remaining time, returning what was left.
    pub fn cancel(&mut self) -> Duration {
        std::mem::take(&mut self.remaining)
    }
}
