//! Scroll position integration.
//!
//! Position is kept as an anchor plus the total run time since the anchor was
//! last set. Run time is summed as [`Duration`], which is exact integer
//! nanoseconds, so splitting an interval into any number of ticks yields the
//! identical position as a single tick of the summed length.

use crate::model::ContentExtent;
use std::time::Duration;

/// Result of advancing the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Position did not change (zero velocity or zero elapsed).
    Unchanged,
    /// Position moved and is still before the end.
    Moved,
    /// Position reached the end of a non-empty extent.
    Exhausted,
}

/// Position/velocity integrator clamped to `[0, extent]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollEngine {
    anchor: f64,
    run: Duration,
    velocity: f64,
    extent: ContentExtent,
}

impl ScrollEngine {
    /// Create an engine at position 0.
    pub fn new(extent: ContentExtent, velocity: f64) -> Self {
        Self {
            anchor: 0.0,
            run: Duration::ZERO,
            velocity: finite_or_zero(velocity),
            extent,
        }
    }

    /// Current position, always within `[0, extent]`.
    pub fn position(&self) -> f64 {
        let raw = self.anchor + self.velocity * self.run.as_secs_f64();
        raw.clamp(0.0, self.extent.total())
    }

    /// Current velocity in rows per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current extent.
    pub fn extent(&self) -> ContentExtent {
        self.extent
    }

    /// Distance left to the end.
    pub fn remaining(&self) -> f64 {
        (self.extent.total() - self.position()).max(0.0)
    }

    /// True when the position sits on the end of a non-empty extent.
    pub fn at_end(&self) -> bool {
        !self.extent.is_empty() && self.position() >= self.extent.total()
    }

    /// Move forward by `elapsed` at the current velocity.
    pub fn advance(&mut self, elapsed: Duration) -> Advance {
        let before = self.position();
        self.run = self.run.saturating_add(elapsed);
        let after = self.position();

        if !self.extent.is_empty() && after >= self.extent.total() {
            self.anchor = self.extent.total();
            self.run = Duration::ZERO;
            return Advance::Exhausted;
        }

        if after == before {
            Advance::Unchanged
        } else {
            Advance::Moved
        }
    }

    /// Change velocity, keeping the current position.
    pub fn set_velocity(&mut self, velocity: f64) {
        self.reanchor(self.position());
        self.velocity = finite_or_zero(velocity);
    }

    /// Move by a signed delta, clamped.
    pub fn jump_by(&mut self, delta: f64) {
        let target = self.position() + finite_or_zero(delta);
        self.reanchor(target);
    }

    /// Move to a fraction of the extent. The fraction is clamped to `[0, 1]`.
    pub fn jump_to_fraction(&mut self, fraction: f64) {
        let fraction = finite_or_zero(fraction).clamp(0.0, 1.0);
        self.reanchor(fraction * self.extent.total());
    }

    /// Replace the extent, preserving the position as a fraction of it.
    ///
    /// When the old extent was empty the position becomes 0.
    pub fn rescale(&mut self, extent: ContentExtent) {
        let fraction = if self.extent.is_empty() {
            0.0
        } else {
            self.position() / self.extent.total()
        };
        self.extent = extent;
        self.reanchor(fraction * extent.total());
    }

    /// Replace the extent and return to position 0.
    pub fn reset(&mut self, extent: ContentExtent) {
        self.extent = extent;
        self.reanchor(0.0);
    }

    fn reanchor(&mut self, position: f64) {
        self.anchor = position.clamp(0.0, self.extent.total());
        self.run = Duration::ZERO;
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(extent: f64, velocity: f64) -> ScrollEngine {
        ScrollEngine::new(ContentExtent::new(extent), velocity)
    }

    #[test]
    fn advance_moves_by_velocity_times_elapsed() {
        let mut e = engine(1000.0, 20.0);
        assert_eq!(e.advance(Duration::from_secs(25)), Advance::Moved);
        assert_eq!(e.position(), 500.0);
    }

    #[test]
    fn split_ticks_match_single_tick_exactly() {
        let mut split = engine(1000.0, 1.7);
        for _ in 0..7 {
            split.advance(Duration::from_millis(333));
        }
        let mut single = engine(1000.0, 1.7);
        single.advance(Duration::from_millis(333 * 7));
        assert_eq!(split.position().to_bits(), single.position().to_bits());
    }

    #[test]
    fn reaching_the_end_reports_exhaustion_and_clamps() {
        let mut e = engine(10.0, 5.0);
        assert_eq!(e.advance(Duration::from_secs(3)), Advance::Exhausted);
        assert_eq!(e.position(), 10.0);
        assert!(e.at_end());
    }

    #[test]
    fn empty_extent_never_exhausts() {
        let mut e = engine(0.0, 5.0);
        assert_eq!(e.advance(Duration::from_secs(3)), Advance::Unchanged);
        assert_eq!(e.position(), 0.0);
        assert!(!e.at_end());
    }

    #[test]
    fn jumps_clamp_to_bounds() {
        let mut e = engine(100.0, 0.0);
        e.jump_by(-50.0);
        assert_eq!(e.position(), 0.0);
        e.jump_by(500.0);
        assert_eq!(e.position(), 100.0);
        e.jump_to_fraction(7.0);
        assert_eq!(e.position(), 100.0);
        e.jump_to_fraction(-1.0);
        assert_eq!(e.position(), 0.0);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut e = engine(100.0, 0.0);
        e.jump_by(40.0);
        e.jump_by(f64::NAN);
        assert_eq!(e.position(), 40.0);
        e.set_velocity(f64::INFINITY);
        assert_eq!(e.velocity(), 0.0);
    }

    #[test]
    fn rescale_preserves_fraction() {
        let mut e = engine(1000.0, 0.0);
        e.jump_by(500.0);
        e.rescale(ContentExtent::new(2000.0));
        assert_eq!(e.position(), 1000.0);
    }

    #[test]
    fn rescale_from_empty_goes_to_top() {
        let mut e = engine(0.0, 0.0);
        e.rescale(ContentExtent::new(300.0));
        assert_eq!(e.position(), 0.0);
    }

    #[test]
    fn velocity_change_keeps_position() {
        let mut e = engine(1000.0, 10.0);
        e.advance(Duration::from_secs(2));
        e.set_velocity(1.0);
        assert_eq!(e.position(), 20.0);
        e.advance(Duration::from_secs(1));
        assert_eq!(e.position(), 21.0);
    }
}
