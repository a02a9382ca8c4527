//! Playback phase.

use serde::Serialize;
use std::fmt;

/// Observable playback phase.
///
/// Transitions are driven exclusively by commands and ticks; see
/// `PlaybackController` for the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackPhase {
    /// Initial state, and the state after Stop or a script load. Position is 0.
    Idle,
    /// Counting down before continuous play.
    Countdown,
    /// Position advances with elapsed time.
    Playing,
    /// Motion halted; velocity and position preserved.
    Paused,
    /// The end of the content was reached while playing.
    Finished,
}

impl PlaybackPhase {
    /// Short upper-case label for the status bar.
    pub fn label(self) -> &'static str {
        match self {
            PlaybackPhase::Idle => "READY",
            PlaybackPhase::Countdown => "COUNTDOWN",
            PlaybackPhase::Playing => "PLAYING",
            PlaybackPhase::Paused => "PAUSED",
            PlaybackPhase::Finished => "FINISHED",
        }
    }
}

impl fmt::Display for PlaybackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlaybackPhase::Idle => "idle",
            PlaybackPhase::Countdown => "countdown",
            PlaybackPhase::Playing => "playing",
            PlaybackPhase::Paused => "paused",
            PlaybackPhase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(PlaybackPhase::Countdown.to_string(), "countdown");
        assert_eq!(PlaybackPhase::Idle.to_string(), "idle");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&PlaybackPhase::Finished).unwrap();
        assert_eq!(json, "\"finished\"");
    }
}
