//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod key_handler;
pub mod prompt;

// Re-export for convenience
pub use app_state::{AppState, StatusKind, StatusMessage};
pub use key_handler::{handle_key_action, handle_prompt_key, Effect, KeyContext};
pub use prompt::{PromptKind, PromptState, PromptValue};
