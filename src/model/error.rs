//! Error types for tprompt.
//!
//! This module defines a hierarchical error taxonomy using `thiserror` for structured error
//! handling. Errors compose via `?` and `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level application error wrapping all fatal failures
//!   - [`InputError`] - Script file/stdin reading failures
//!   - `ConfigError` / `LoggingError` - startup failures
//!   - `std::io::Error` - Terminal/TUI rendering failures
//! - [`CommandError`] - A command was rejected by the playback controller
//!   - [`LayoutError`] - The layout provider could not measure the script
//!
//! # Error Recovery Strategy
//!
//! Command rejections are **non-fatal**: the controller leaves its state untouched, the
//! shell logs the rejection and shows it in the status bar, and playback continues.
//! Input, configuration and terminal errors are fatal and propagate to `main`.

use crate::config::loader::ConfigError;
use crate::engine::command::CommandKind;
use crate::engine::phase::PlaybackPhase;
use crate::logging::LoggingError;
use crate::output::SinkError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all fatal failure modes.
///
/// # Recovery Behavior
///
/// Every variant ends the process: the terminal is restored and the error is printed to
/// stderr. Recoverable conditions never reach this type; they surface as
/// [`CommandError`] from `PlaybackController::dispatch`.
///
/// # Examples
///
/// ```no_run
/// use tprompt::model::error::{AppError, InputError};
///
/// fn run_app() -> Result<(), AppError> {
///     // InputError automatically converts to AppError via From
///     let _script = read_script()?;
///     Ok(())
/// }
/// # fn read_script() -> Result<(), InputError> { Ok(()) }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to read the script from file or stdin.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// The snapshot log could not be opened or written.
    #[error("Snapshot sink error: {0}")]
    Sink(#[from] SinkError),

    /// The initial layout could not be measured (e.g. zero-sized terminal).
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Terminal or TUI rendering error.
    ///
    /// Failures in the crossterm/ratatui layer, such as broken pipes or I/O errors
    /// during rendering. Without a working terminal the TUI cannot function.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when reading a script from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified script file does not exist at the given path.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use tprompt::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.txt")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.txt"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The filesystem path that was not found.
        path: PathBuf,
    },

    /// Generic I/O error reading from the input source.
    ///
    /// Permission denied, disk read errors, broken pipes on stdin. The `#[from]`
    /// attribute lets `?` convert `std::io::Error` directly.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The layout provider could not produce a content extent.
///
/// Layout failures are recoverable: the controller keeps its previous extent, position,
/// velocity and metrics, and reports the failure to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// The viewport has no drawable rows or columns.
    ///
    /// # Examples
    ///
    /// ```
    /// use tprompt::model::error::LayoutError;
    ///
    /// let err = LayoutError::EmptyViewport { columns: 0, rows: 24 };
    /// assert!(err.to_string().contains("0x24"));
    /// ```
    #[error("Viewport has no drawable area ({columns}x{rows})")]
    EmptyViewport {
        /// Viewport width in columns.
        columns: u16,
        /// Viewport height in rows.
        rows: u16,
    },

    /// The provider rejected the metrics or script for another reason.
    #[error("Cannot measure script: {reason}")]
    Unmeasurable {
        /// Human-readable explanation from the provider.
        reason: String,
    },
}

/// A command rejected by the playback controller.
///
/// Rejection never mutates controller state. The caller decides how to surface it;
/// the TUI shows the message in the status bar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// `FitToDuration` with a non-positive (or non-finite) target.
    ///
    /// # Examples
    ///
    /// ```
    /// use tprompt::model::error::CommandError;
    ///
    /// let err = CommandError::InvalidTarget { seconds: 0.0 };
    /// assert!(err.to_string().contains("greater than zero"));
    /// ```
    #[error("Target duration must be greater than zero (got {seconds}s)")]
    InvalidTarget {
        /// The rejected target, in seconds.
        seconds: f64,
    },

    /// The command is not legal in the current phase (jumps during a countdown).
    #[error("{command} is not allowed while {phase}")]
    IllegalInPhase {
        /// Which command was rejected.
        command: CommandKind,
        /// The phase that rejected it.
        phase: PlaybackPhase,
    },

    /// Remeasuring the script failed.
    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}
