//! Translate key actions into engine commands and UI changes.
//!
//! Handlers mutate only [`AppState`] and return an [`Effect`] for the shell to carry
//! out. They never touch the engine, the terminal or the filesystem.

use super::app_state::{AppState, StatusMessage};
use super::prompt::{self, PromptKind, PromptValue};
use crate::engine::{Command, PlaybackPhase};
use crate::model::{KeyAction, LayoutMetrics, Margins};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

/// Font size change per key press.
pub const FONT_STEP: u16 = 2;
/// Line spacing change per key press.
pub const SPACING_STEP: f64 = 0.1;
/// Horizontal margin change per key press, in columns.
pub const MARGIN_STEP: u16 = 2;

/// What the handler needs to know about the engine.
#[derive(Debug, Clone, Copy)]
pub struct KeyContext<'a> {
    /// Current playback phase.
    pub phase: PlaybackPhase,
    /// Latest layout metrics, including a relayout still waiting in the debouncer.
    pub metrics: &'a LayoutMetrics,
    /// Speed change per key press, rows per second.
    pub speed_step: f64,
    /// Rows moved by a nudge.
    pub nudge_rows: f64,
}

impl KeyContext<'_> {
    /// Rows moved by a page jump: one screen less two rows of overlap.
    pub fn page_rows(&self) -> f64 {
        f64::from(self.metrics.viewport().rows.saturating_sub(2).max(1))
    }
}

/// Work for the shell after a key was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing beyond the state change.
    None,
    /// Submit a command to the timeline.
    Command(Command),
    /// Submit new layout metrics through the relayout debouncer.
    Relayout(LayoutMetrics),
    /// Read a script file and load it.
    Open(PathBuf),
    /// Leave the application.
    Quit,
}

/// Handle a bound key action.
pub fn handle_key_action(state: &mut AppState, action: KeyAction, ctx: &KeyContext<'_>) -> Effect {
    if state.help_visible {
        return match action {
            KeyAction::Help | KeyAction::Stop => {
                state.help_visible = false;
                Effect::None
            }
            KeyAction::Quit => quit(state),
            _ => Effect::None,
        };
    }

    match action {
        KeyAction::TogglePlay => Effect::Command(match ctx.phase {
            PlaybackPhase::Playing => Command::Pause,
            PlaybackPhase::Countdown => Command::Stop,
            PlaybackPhase::Idle | PlaybackPhase::Paused | PlaybackPhase::Finished => {
                Command::Start
            }
        }),
        KeyAction::Stop => Effect::Command(Command::Stop),
        KeyAction::Rewind => Effect::Command(Command::Rewind),

        KeyAction::SpeedUp => Effect::Command(Command::SetSpeed(ctx.speed_step)),
        KeyAction::SpeedDown => Effect::Command(Command::SetSpeed(-ctx.speed_step)),
        KeyAction::FitToTarget => {
            Effect::Command(Command::FitToDuration(state.target_duration_secs))
        }
        KeyAction::PromptTarget => open_prompt(state, PromptKind::TargetDuration),

        KeyAction::NudgeBack => Effect::Command(Command::JumpBy(-ctx.nudge_rows)),
        KeyAction::NudgeForward => Effect::Command(Command::JumpBy(ctx.nudge_rows)),
        KeyAction::PageBack => Effect::Command(Command::JumpBy(-ctx.page_rows())),
        KeyAction::PageForward => Effect::Command(Command::JumpBy(ctx.page_rows())),
        KeyAction::PromptPercent => open_prompt(state, PromptKind::Percent),

        KeyAction::FontLarger
        | KeyAction::FontSmaller
        | KeyAction::SpacingUp
        | KeyAction::SpacingDown
        | KeyAction::MarginWider
        | KeyAction::MarginNarrower => relayout(ctx.metrics, adjust_layout(ctx.metrics, action)),

        KeyAction::ToggleMirror => Effect::Command(Command::ToggleMirror),
        KeyAction::ToggleFocusBand => {
            state.focus_band = !state.focus_band;
            Effect::None
        }
        KeyAction::CycleTheme => {
            state.theme = state.theme.next();
            state.set_status(StatusMessage::info(format!("Theme: {}", state.theme)));
            Effect::None
        }

        KeyAction::PromptOpen => open_prompt(state, PromptKind::OpenFile),
        KeyAction::Quit => quit(state),
        KeyAction::Help => {
            state.help_visible = true;
            Effect::None
        }
    }
}

/// Handle a raw key while a prompt is open.
///
/// Enter submits, Esc cancels, and editing keys change the input. A parse failure
/// closes the prompt and leaves an error in the status line.
pub fn handle_prompt_key(state: &mut AppState, key: KeyEvent) -> Effect {
    let current = std::mem::take(&mut state.prompt);
    match key.code {
        KeyCode::Esc => {
            state.prompt = prompt::cancel_prompt(current);
            Effect::None
        }
        KeyCode::Enter => {
            let (next, result) = prompt::submit_prompt(current);
            state.prompt = next;
            match result {
                Ok(value) => handle_prompt_value(state, value),
                Err(err) => {
                    state.set_status(StatusMessage::error(err.to_string()));
                    Effect::None
                }
            }
        }
        KeyCode::Backspace => {
            state.prompt = prompt::handle_backspace(current);
            Effect::None
        }
        KeyCode::Left => {
            state.prompt = prompt::handle_cursor_left(current);
            Effect::None
        }
        KeyCode::Right => {
            state.prompt = prompt::handle_cursor_right(current);
            Effect::None
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.prompt = prompt::handle_char_input(current, ch);
            Effect::None
        }
        _ => {
            state.prompt = current;
            Effect::None
        }
    }
}

/// Turn a submitted prompt value into an effect.
pub fn handle_prompt_value(state: &mut AppState, value: PromptValue) -> Effect {
    match value {
        PromptValue::Fraction(fraction) => Effect::Command(Command::JumpToFraction(fraction)),
        PromptValue::Target(duration) => {
            let seconds = duration.as_secs_f64();
            state.target_duration_secs = seconds;
            Effect::Command(Command::FitToDuration(seconds))
        }
        PromptValue::Path(path) => Effect::Open(path),
    }
}

/// Metrics after one step of a layout key. Other actions return a clone.
pub fn adjust_layout(metrics: &LayoutMetrics, action: KeyAction) -> LayoutMetrics {
    let margins = metrics.margins();
    match action {
        KeyAction::FontLarger => metrics.with_font_size(metrics.font_size().saturating_add(FONT_STEP)),
        KeyAction::FontSmaller => {
            metrics.with_font_size(metrics.font_size().saturating_sub(FONT_STEP))
        }
        KeyAction::SpacingUp => metrics.with_line_spacing(metrics.line_spacing() + SPACING_STEP),
        KeyAction::SpacingDown => metrics.with_line_spacing(metrics.line_spacing() - SPACING_STEP),
        KeyAction::MarginWider => metrics.with_margins(Margins {
            horizontal: margins.horizontal.saturating_add(MARGIN_STEP),
            ..margins
        }),
        KeyAction::MarginNarrower => metrics.with_margins(Margins {
            horizontal: margins.horizontal.saturating_sub(MARGIN_STEP),
            ..margins
        }),
        _ => metrics.clone(),
    }
}

fn relayout(current: &LayoutMetrics, next: LayoutMetrics) -> Effect {
    if next == *current {
        Effect::None
    } else {
        Effect::Relayout(next)
    }
}

fn open_prompt(state: &mut AppState, kind: PromptKind) -> Effect {
    state.prompt = prompt::activate_prompt(std::mem::take(&mut state.prompt), kind);
    Effect::None
}

fn quit(state: &mut AppState) -> Effect {
    state.should_quit = true;
    Effect::Quit
}

#[cfg(test)]
#[path = "key_handler_tests.rs"]
mod tests;
