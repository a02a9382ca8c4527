//! Configuration file loading with precedence handling.

use crate::engine::controller::{
    ControllerSettings, DEFAULT_COUNTDOWN_SECONDS, DEFAULT_MAX_SPEED, DEFAULT_MIN_SPEED,
    DEFAULT_SPEED,
};
use crate::engine::debounce::DEFAULT_RELAYOUTS_PER_SECOND;
use crate::model::metrics::{DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING};
use crate::model::{LayoutMetrics, Margins, Viewport};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default manual speed step, rows per second.
pub const DEFAULT_SPEED_STEP: f64 = 0.25;
/// Default nudge distance, rows.
pub const DEFAULT_NUDGE_ROWS: f64 = 4.0;
/// Default scroll tick interval in milliseconds (~60 Hz).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 16;
/// Default target duration for fit-to-time, seconds.
pub const DEFAULT_TARGET_DURATION_SECS: f64 = 300.0;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/tprompt/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Initial scroll speed, rows per second.
    #[serde(default)]
    pub speed: Option<f64>,

    /// Lowest speed reachable with the speed keys.
    #[serde(default)]
    pub min_speed: Option<f64>,

    /// Highest speed reachable with the speed keys.
    #[serde(default)]
    pub max_speed: Option<f64>,

    /// Speed change per key press.
    #[serde(default)]
    pub speed_step: Option<f64>,

    /// Countdown before playing, seconds. 0 disables it.
    #[serde(default)]
    pub countdown_seconds: Option<u32>,

    /// Target duration offered by the fit key, seconds.
    #[serde(default)]
    pub target_duration_secs: Option<f64>,

    /// Font family shown in the status bar.
    #[serde(default)]
    pub font_family: Option<String>,

    /// Font size; larger means a narrower reading column.
    #[serde(default)]
    pub font_size: Option<u16>,

    /// Line spacing multiplier.
    #[serde(default)]
    pub line_spacing: Option<f64>,

    /// Left and right margin in columns.
    #[serde(default)]
    pub margin_horizontal: Option<u16>,

    /// Top and bottom margin in rows.
    #[serde(default)]
    pub margin_vertical: Option<u16>,

    /// Start mirrored.
    #[serde(default)]
    pub mirrored: Option<bool>,

    /// Theme name: light, dark, amber or mint.
    #[serde(default)]
    pub theme: Option<String>,

    /// Show the reading focus band.
    #[serde(default)]
    pub focus_band: Option<bool>,

    /// Allow the last line to scroll up to the top of the screen.
    #[serde(default)]
    pub scroll_past_end: Option<bool>,

    /// Rows moved by the nudge keys.
    #[serde(default)]
    pub nudge_rows: Option<f64>,

    /// Scroll tick interval, milliseconds.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Ceiling on relayouts per second while resizing or changing fonts.
    #[serde(default)]
    pub relayout_max_per_second: Option<u32>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Initial scroll speed.
    pub speed: f64,
    /// Lower speed bound.
    pub min_speed: f64,
    /// Upper speed bound.
    pub max_speed: f64,
    /// Speed change per key press.
    pub speed_step: f64,
    /// Countdown seconds.
    pub countdown_seconds: u32,
    /// Target duration for fit-to-time.
    pub target_duration_secs: f64,
    /// Fit to the target duration at startup.
    pub fit_on_start: bool,
    /// Font family.
    pub font_family: String,
    /// Font size.
    pub font_size: u16,
    /// Line spacing multiplier.
    pub line_spacing: f64,
    /// Page margins.
    pub margins: Margins,
    /// Start mirrored.
    pub mirrored: bool,
    /// Theme name.
    pub theme: String,
    /// Show the focus band.
    pub focus_band: bool,
    /// Allow scrolling past the end.
    pub scroll_past_end: bool,
    /// Rows moved by nudge keys.
    pub nudge_rows: f64,
    /// Scroll tick interval in milliseconds.
    pub frame_interval_ms: u64,
    /// Relayout rate limit.
    pub relayout_max_per_second: u32,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            speed_step: DEFAULT_SPEED_STEP,
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            target_duration_secs: DEFAULT_TARGET_DURATION_SECS,
            fit_on_start: false,
            font_family: "Helvetica".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            margins: Margins::default(),
            mirrored: false,
            theme: "dark".to_string(),
            focus_band: true,
            scroll_past_end: true,
            nudge_rows: DEFAULT_NUDGE_ROWS,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            relayout_max_per_second: DEFAULT_RELAYOUTS_PER_SECOND,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Controller tunables.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            initial_speed: self.speed,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            countdown_seconds: self.countdown_seconds,
        }
        .normalized()
    }

    /// Initial layout metrics for a viewport.
    pub fn layout_metrics(&self, viewport: Viewport) -> LayoutMetrics {
        LayoutMetrics::new(viewport)
            .with_font_family(self.font_family.clone())
            .with_font_size(self.font_size)
            .with_line_spacing(self.line_spacing)
            .with_margins(self.margins)
            .with_mirrored(self.mirrored)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/tprompt/tprompt.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("tprompt").join("tprompt.log")
    } else {
        PathBuf::from("tprompt.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/tprompt/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tprompt").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TPROMPT_CONFIG` environment variable
/// 3. Default path `~/.config/tprompt/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("TPROMPT_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TPROMPT_THEME`: Override theme
/// - `TPROMPT_SPEED`: Override initial speed (ignored if not a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(theme) = std::env::var("TPROMPT_THEME") {
        config.theme = theme;
    }

    if let Ok(raw) = std::env::var("TPROMPT_SPEED") {
        match raw.trim().parse::<f64>() {
            Ok(speed) if speed.is_finite() => config.speed = speed,
            _ => tracing::warn!(value = %raw, "Ignoring TPROMPT_SPEED: not a number"),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        speed: config.speed.unwrap_or(defaults.speed),
        min_speed: config.min_speed.unwrap_or(defaults.min_speed),
        max_speed: config.max_speed.unwrap_or(defaults.max_speed),
        speed_step: config.speed_step.unwrap_or(defaults.speed_step),
        countdown_seconds: config
            .countdown_seconds
            .unwrap_or(defaults.countdown_seconds),
        target_duration_secs: config
            .target_duration_secs
            .unwrap_or(defaults.target_duration_secs),
        fit_on_start: defaults.fit_on_start,
        font_family: config.font_family.unwrap_or(defaults.font_family),
        font_size: config.font_size.unwrap_or(defaults.font_size),
        line_spacing: config.line_spacing.unwrap_or(defaults.line_spacing),
        margins: Margins {
            horizontal: config
                .margin_horizontal
                .unwrap_or(defaults.margins.horizontal),
            vertical: config.margin_vertical.unwrap_or(defaults.margins.vertical),
        },
        mirrored: config.mirrored.unwrap_or(defaults.mirrored),
        theme: config.theme.unwrap_or(defaults.theme),
        focus_band: config.focus_band.unwrap_or(defaults.focus_band),
        scroll_past_end: config.scroll_past_end.unwrap_or(defaults.scroll_past_end),
        nudge_rows: config.nudge_rows.unwrap_or(defaults.nudge_rows),
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms)
            .max(1),
        relayout_max_per_second: config
            .relayout_max_per_second
            .unwrap_or(defaults.relayout_max_per_second),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--speed`
    pub speed: Option<f64>,
    /// `--duration`, seconds; also requests a fit at startup.
    pub target_duration_secs: Option<f64>,
    /// `--countdown`
    pub countdown_seconds: Option<u32>,
    /// `--mirror`
    pub mirrored: Option<bool>,
    /// `--theme`
    pub theme: Option<String>,
    /// `--font-size`
    pub font_size: Option<u16>,
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }

    if let Some(target) = cli.target_duration_secs {
        config.target_duration_secs = target;
        config.fit_on_start = true;
    }

    if let Some(countdown) = cli.countdown_seconds {
        config.countdown_seconds = countdown;
    }

    if let Some(mirrored) = cli.mirrored {
        config.mirrored = mirrored;
    }

    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    if let Some(font_size) = cli.font_size {
        config.font_size = font_size;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
