//! Read-only views of playback state.

use super::phase::PlaybackPhase;
use serde::Serialize;

/// Immutable view of engine state delivered to the renderer and other sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current phase.
    pub phase: PlaybackPhase,
    /// Scroll position in rows, within `[0, extent]`.
    pub position: f64,
    /// Scrollable length in rows.
    pub extent: f64,
    /// Velocity in rows per second.
    pub velocity: f64,
    /// Whether velocity is derived from a target duration.
    pub fit_active: bool,
    /// Whether output is mirrored.
    pub mirrored: bool,
    /// Whole seconds left in the countdown, when counting down.
    pub countdown_remaining: Option<u32>,
}

impl Snapshot {
    /// Position as a fraction of the extent; 0 when there is nothing to scroll.
    pub fn progress(&self) -> f64 {
        if self.extent > 0.0 {
            (self.position / self.extent).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Seconds until the end at the current velocity, if moving forward.
    pub fn eta_seconds(&self) -> Option<f64> {
        if self.velocity > 0.0 {
            Some((self.extent - self.position).max(0.0) / self.velocity)
        } else {
            None
        }
    }
}

/// Scroll quantities of the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Position in rows.
    pub position: f64,
    /// Velocity in rows per second.
    pub velocity: f64,
    /// Whether velocity is derived from a target duration.
    pub fit_mode_active: bool,
}
