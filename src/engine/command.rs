//! Commands accepted by the playback controller.

use crate::model::{LayoutMetrics, Script};
use std::fmt;

/// The closed set of requests that may mutate playback state.
///
/// `PlaybackController::dispatch` is the only way to apply one. Out-of-range jump
/// and speed values are clamped, never rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Begin (via countdown) or resume motion.
    Start,
    /// Halt motion, keeping velocity and position.
    Pause,
    /// Return to Idle at position 0 and cancel any countdown.
    Stop,
    /// Move the position by a signed number of rows.
    JumpBy(f64),
    /// Move to a fraction of the extent, `0.0..=1.0`.
    JumpToFraction(f64),
    /// Jump back to position 0 without changing phase.
    Rewind,
    /// Adjust velocity by a signed delta in rows per second. Clears fit mode.
    SetSpeed(f64),
    /// Fit velocity so the remaining content takes this many seconds.
    FitToDuration(f64),
    /// Flip the mirrored flag in the layout metrics.
    ToggleMirror,
    /// Replace the layout metrics and remeasure.
    LayoutChanged(LayoutMetrics),
    /// Replace the script, remeasure and reset to Idle.
    LoadScript(Script),
}

impl Command {
    /// Payload-free discriminant, used in errors and logs.
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Pause => CommandKind::Pause,
            Command::Stop => CommandKind::Stop,
            Command::JumpBy(_) => CommandKind::JumpBy,
            Command::JumpToFraction(_) => CommandKind::JumpToFraction,
            Command::Rewind => CommandKind::Rewind,
            Command::SetSpeed(_) => CommandKind::SetSpeed,
            Command::FitToDuration(_) => CommandKind::FitToDuration,
            Command::ToggleMirror => CommandKind::ToggleMirror,
            Command::LayoutChanged(_) => CommandKind::LayoutChanged,
            Command::LoadScript(_) => CommandKind::LoadScript,
        }
    }
}

/// Discriminant of [`Command`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// [`Command::Start`]
    Start,
    /// [`Command::Pause`]
    Pause,
    /// [`Command::Stop`]
    Stop,
    /// [`Command::JumpBy`]
    JumpBy,
    /// [`Command::JumpToFraction`]
    JumpToFraction,
    /// [`Command::Rewind`]
    Rewind,
    /// [`Command::SetSpeed`]
    SetSpeed,
    /// [`Command::FitToDuration`]
    FitToDuration,
    /// [`Command::ToggleMirror`]
    ToggleMirror,
    /// [`Command::LayoutChanged`]
    LayoutChanged,
    /// [`Command::LoadScript`]
    LoadScript,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Start => "start",
            CommandKind::Pause => "pause",
            CommandKind::Stop => "stop",
            CommandKind::JumpBy => "jump-by",
            CommandKind::JumpToFraction => "jump-to-fraction",
            CommandKind::Rewind => "rewind",
            CommandKind::SetSpeed => "set-speed",
            CommandKind::FitToDuration => "fit-to-duration",
            CommandKind::ToggleMirror => "toggle-mirror",
            CommandKind::LayoutChanged => "layout-changed",
            CommandKind::LoadScript => "load-script",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ignores_payload() {
        assert_eq!(Command::JumpBy(3.0).kind(), Command::JumpBy(-9.0).kind());
        assert_eq!(Command::FitToDuration(0.0).kind(), CommandKind::FitToDuration);
    }

    #[test]
    fn kind_display_is_kebab_case() {
        assert_eq!(CommandKind::JumpToFraction.to_string(), "jump-to-fraction");
        assert_eq!(CommandKind::Start.to_string(), "start");
    }
}
