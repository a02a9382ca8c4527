//! One-line input prompts (pure state transitions).
//!
//! A prompt collects a go-to percentage, a target duration or a script path.
//! All functions are pure - no side effects, testable without TUI.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// What a prompt is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Percentage of the script, 0-100.
    Percent,
    /// Target reading time: `SS`, `MM:SS` or `HH:MM:SS`.
    TargetDuration,
    /// Path of a script to load.
    OpenFile,
}

impl PromptKind {
    /// Label shown before the input.
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Percent => "Go to %",
            PromptKind::TargetDuration => "Target time",
            PromptKind::OpenFile => "Open",
        }
    }

    fn accepts(self, ch: char) -> bool {
        match self {
            PromptKind::Percent => ch.is_ascii_digit() || ch == '.',
            PromptKind::TargetDuration => ch.is_ascii_digit() || ch == ':',
            PromptKind::OpenFile => !ch.is_control(),
        }
    }
}

/// Prompt state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromptState {
    /// No prompt open.
    #[default]
    Inactive,
    /// Collecting input. `cursor` is a char index into `input`.
    Typing {
        /// What is being asked for.
        kind: PromptKind,
        /// Text entered so far.
        input: String,
        /// Cursor position in chars.
        cursor: usize,
    },
}

impl PromptState {
    /// True while a prompt is open.
    pub fn is_active(&self) -> bool {
        matches!(self, PromptState::Typing { .. })
    }
}

/// A successfully parsed prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptValue {
    /// Fraction of the extent, `0.0..=1.0`.
    Fraction(f64),
    /// Target reading time.
    Target(Duration),
    /// Script to load.
    Path(PathBuf),
}

/// Why a prompt could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    /// Not a number between 0 and 100.
    #[error("'{0}' is not a percentage between 0 and 100")]
    InvalidPercent(String),
    /// Not `SS`, `MM:SS` or `HH:MM:SS`, or zero.
    #[error("'{0}' is not a duration (use SS, MM:SS or HH:MM:SS)")]
    InvalidDuration(String),
    /// Empty path.
    #[error("No file given")]
    EmptyPath,
    /// No prompt was open.
    #[error("No prompt is open")]
    NotTyping,
}

/// Open a prompt. No-op if one is already open.
pub fn activate_prompt(state: PromptState, kind: PromptKind) -> PromptState {
    match state {
        PromptState::Inactive => PromptState::Typing {
            kind,
            input: String::new(),
            cursor: 0,
        },
        other => other,
    }
}

/// Insert a character at the cursor. Characters the prompt cannot use are ignored.
pub fn handle_char_input(state: PromptState, ch: char) -> PromptState {
    match state {
        PromptState::Typing {
            kind,
            mut input,
            cursor,
        } if kind.accepts(ch) => {
            let byte = byte_index(&input, cursor);
            input.insert(byte, ch);
            PromptState::Typing {
                kind,
                input,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn handle_backspace(state: PromptState) -> PromptState {
    match state {
        PromptState::Typing {
            kind,
            mut input,
            cursor,
        } if cursor > 0 => {
            let byte = byte_index(&input, cursor - 1);
            input.remove(byte);
            PromptState::Typing {
                kind,
                input,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Move the cursor left, saturating at 0.
pub fn handle_cursor_left(state: PromptState) -> PromptState {
    match state {
        PromptState::Typing {
            kind,
            input,
            cursor,
        } => PromptState::Typing {
            kind,
            input,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor right, saturating at the end of the input.
pub fn handle_cursor_right(state: PromptState) -> PromptState {
    match state {
        PromptState::Typing {
            kind,
            input,
            cursor,
        } => {
            let max_cursor = input.chars().count();
            PromptState::Typing {
                kind,
                input,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Close the prompt without submitting.
pub fn cancel_prompt(_state: PromptState) -> PromptState {
    PromptState::Inactive
}

/// Parse the input. The prompt closes whether or not parsing succeeds.
pub fn submit_prompt(state: PromptState) -> (PromptState, Result<PromptValue, PromptError>) {
    let result = match state {
        PromptState::Typing { kind, input, .. } => match kind {
            PromptKind::Percent => parse_percent(&input)
                .map(|pct| PromptValue::Fraction(pct / 100.0))
                .ok_or(PromptError::InvalidPercent(input)),
            PromptKind::TargetDuration => parse_duration(&input)
                .map(PromptValue::Target)
                .ok_or(PromptError::InvalidDuration(input)),
            PromptKind::OpenFile => {
                let trimmed = input.trim();
                if trimmed.is_empty() {
                    Err(PromptError::EmptyPath)
                } else {
                    Ok(PromptValue::Path(PathBuf::from(trimmed)))
                }
            }
        },
        PromptState::Inactive => Err(PromptError::NotTyping),
    };
    (PromptState::Inactive, result)
}

/// Parse a percentage in `0..=100`.
///
/// ```
/// use tprompt::state::prompt::parse_percent;
///
/// assert_eq!(parse_percent("50"), Some(50.0));
/// assert_eq!(parse_percent("101"), None);
/// ```
pub fn parse_percent(input: &str) -> Option<f64> {
    let value: f64 = input.trim().parse().ok()?;
    (value.is_finite() && (0.0..=100.0).contains(&value)).then_some(value)
}

/// Parse `SS`, `MM:SS` or `HH:MM:SS` into a positive duration.
///
/// Only the leading field may exceed 59, so `90` and `90:00` are accepted.
///
/// ```
/// use std::time::Duration;
/// use tprompt::state::prompt::parse_duration;
///
/// assert_eq!(parse_duration("1:30"), Some(Duration::from_secs(90)));
/// assert_eq!(parse_duration("1:02:03"), Some(Duration::from_secs(3723)));
/// assert_eq!(parse_duration("0"), None);
/// ```
pub fn parse_duration(input: &str) -> Option<Duration> {
    let fields: Vec<u64> = input
        .trim()
        .split(':')
        .map(|field| field.parse::<u64>().ok())
        .collect::<Option<_>>()?;

    let (leading, rest) = fields.split_first()?;
    if rest.len() > 2 || rest.iter().any(|&v| v >= 60) {
        return None;
    }
    let total = rest
        .iter()
        .try_fold(*leading, |acc, &v| acc.checked_mul(60)?.checked_add(v))?;

    (total > 0).then(|| Duration::from_secs(total))
}

fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map_or(s.len(), |(byte, _)| byte)
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
