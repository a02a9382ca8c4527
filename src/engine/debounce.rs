//! Rate limiting for expensive relayouts.

use std::time::{Duration, Instant};

/// Default ceiling on relayouts per second.
pub const DEFAULT_RELAYOUTS_PER_SECOND: u32 = 8;

/// Collapses bursts of values into at most one release per interval.
///
/// The first value after a quiet period is released immediately; values that
/// arrive within the interval replace each other and the latest is released by
/// [`Debouncer::poll`] once the interval has passed. The final value of a burst
/// is therefore never lost.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    last_release: Option<Instant>,
    pending: Option<T>,
}

impl<T> Debouncer<T> {
    /// Create a debouncer releasing at most once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: None,
            pending: None,
        }
    }

    /// Create a debouncer releasing at most `per_second` times a second.
    ///
    /// Zero means unlimited.
    pub fn per_second(per_second: u32) -> Self {
        if per_second == 0 {
            Self::new(Duration::ZERO)
        } else {
            Self::new(Duration::from_secs(1) / per_second)
        }
    }

    /// Offer a value. Returns it straight back if it may be applied now.
    pub fn submit(&mut self, value: T, now: Instant) -> Option<T> {
        if self.ready(now) {
            self.pending = None;
            self.last_release = Some(now);
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Release the held value once the interval has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.is_some() && self.ready(now) {
            self.last_release = Some(now);
            self.pending.take()
        } else {
            None
        }
    }

    /// The value waiting to be released, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// When the held value becomes releasable.
    ///
    /// A value is only ever held after an earlier release, so this is `None`
    /// exactly when nothing is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        self.last_release.map(|last| last + self.interval)
    }

    fn ready(&self, now: Instant) -> bool {
        self.last_release
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}
