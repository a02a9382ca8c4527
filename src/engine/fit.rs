//! Duration fitting.

use crate::model::CommandError;
use std::time::Duration;

/// Shortest remaining time used when refitting after a layout change.
///
/// Once playback has used up (or overrun) the target, the remaining content is
/// fitted to this many seconds instead of dividing by zero.
pub const MIN_REFIT_SECONDS: f64 = 1.0;

/// Velocity that covers `distance` rows in `target_seconds`.
///
/// Fails with [`CommandError::InvalidTarget`] for a target that is not a finite
/// positive number.
///
/// ```
/// use tprompt::engine::fit::fit_velocity;
///
/// assert_eq!(fit_velocity(1000.0, 50.0).unwrap(), 20.0);
/// assert!(fit_velocity(1000.0, 0.0).is_err());
/// ```
pub fn fit_velocity(distance: f64, target_seconds: f64) -> Result<f64, CommandError> {
    if !target_seconds.is_finite() || target_seconds <= 0.0 {
        return Err(CommandError::InvalidTarget {
            seconds: target_seconds,
        });
    }
    Ok(distance.max(0.0) / target_seconds)
}

/// Active fit: the requested total duration and how much of it has been played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlan {
    target_seconds: f64,
    played: Duration,
}

impl FitPlan {
    /// Start a plan for a validated target.
    pub fn new(target_seconds: f64) -> Self {
        Self {
            target_seconds,
            played: Duration::ZERO,
        }
    }

    /// Requested duration in seconds.
    pub fn target_seconds(&self) -> f64 {
        self.target_seconds
    }

    /// Play time accumulated since the plan was made.
    pub fn played(&self) -> Duration {
        self.played
    }

    /// Record time spent playing.
    pub fn record_play(&mut self, elapsed: Duration) {
        self.played = self.played.saturating_add(elapsed);
    }

    /// Forget play time, e.g. after returning to the top.
    pub fn reset_played(&mut self) {
        self.played = Duration::ZERO;
    }

    /// Plan whose target is the time `distance` takes at `velocity`.
    ///
    /// `None` when that time is not a finite positive number, e.g. nothing is
    /// left to scroll or the velocity is zero.
    ///
    /// ```
    /// use tprompt::engine::fit::FitPlan;
    ///
    /// assert_eq!(FitPlan::matching(600.0, 20.0).map(|p| p.target_seconds()), Some(30.0));
    /// assert!(FitPlan::matching(600.0, 0.0).is_none());
    /// ```
    pub fn matching(distance: f64, velocity: f64) -> Option<Self> {
        let seconds = distance / velocity;
        (seconds.is_finite() && seconds > 0.0).then(|| Self::new(seconds))
    }

    /// Seconds left of the target.
    ///
    /// Never below [`MIN_REFIT_SECONDS`], or below the whole target when that
    /// is shorter.
    pub fn remaining_seconds(&self) -> f64 {
        let floor = MIN_REFIT_SECONDS.min(self.target_seconds);
        (self.target_seconds - self.played.as_secs_f64()).max(floor)
    }

    /// Velocity that covers `distance` in the remaining time.
    pub fn refit(&self, distance: f64) -> f64 {
        distance.max(0.0) / self.remaining_seconds()
    }
}
