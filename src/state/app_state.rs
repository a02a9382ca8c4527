//! Presentation state owned by the shell.
//!
//! Playback state lives in the engine. This holds only what the engine does not
//! care about: theme, overlays, the open prompt and the status line.

use super::prompt::PromptState;
use crate::model::Theme;

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Informational.
    Info,
    /// Something was rejected or failed.
    Error,
}

/// One-line message shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Severity.
    pub kind: StatusKind,
}

impl StatusMessage {
    /// Informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    /// Error message.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }
}

/// Shell-side UI state.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Active colour theme.
    pub theme: Theme,
    /// Whether the reading focus band is drawn.
    pub focus_band: bool,
    /// Whether the help overlay is open.
    pub help_visible: bool,
    /// Open prompt, if any.
    pub prompt: PromptState,
    /// Status line message.
    pub status: Option<StatusMessage>,
    /// Target used by the fit key, seconds.
    pub target_duration_secs: f64,
    /// Set when the user asked to quit.
    pub should_quit: bool,
}

impl AppState {
    /// Create state with the given theme and fit target.
    pub fn new(theme: Theme, target_duration_secs: f64) -> Self {
        Self {
            theme,
            focus_band: true,
            help_visible: false,
            prompt: PromptState::Inactive,
            status: None,
            target_duration_secs,
            should_quit: false,
        }
    }

    /// Replace the status line.
    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    /// Clear the status line.
    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::default(), crate::config::loader::DEFAULT_TARGET_DURATION_SECS)
    }
}
