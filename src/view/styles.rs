//! Theme palettes and colour configuration.

use crate::model::Theme;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Explicitly enabled or disabled colours.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== Palette =====

/// Resolved styles for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Script text on the prompter background.
    pub text: Style,
    /// Script text inside the focus band.
    pub band: Style,
    /// Status bar.
    pub status: Style,
    /// Error message in the status bar.
    pub error: Style,
    /// Overlay borders and highlights.
    pub accent: Style,
}

impl Palette {
    /// Palette for `theme`. Without colours everything uses the terminal default,
    /// and the focus band falls back to bold text.
    pub fn new(theme: Theme, colors: ColorConfig) -> Self {
        if !colors.colors_enabled() {
            return Self {
                text: Style::default(),
                band: Style::default().add_modifier(Modifier::BOLD),
                status: Style::default().add_modifier(Modifier::REVERSED),
                error: Style::default().add_modifier(Modifier::BOLD),
                accent: Style::default(),
            };
        }

        let (fg, bg, band_bg) = theme_colors(theme);
        Self {
            text: Style::default().fg(fg).bg(bg),
            band: Style::default().fg(fg).bg(band_bg),
            status: Style::default().fg(bg).bg(fg),
            error: Style::default().fg(Color::White).bg(Color::Red),
            accent: Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD),
        }
    }
}

/// Foreground, background and focus band background.
fn theme_colors(theme: Theme) -> (Color, Color, Color) {
    match theme {
        Theme::Light => (Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255), Color::Rgb(225, 225, 225)),
        Theme::Dark => (Color::Rgb(255, 255, 255), Color::Rgb(0, 0, 0), Color::Rgb(40, 40, 40)),
        Theme::Amber => (
            Color::Rgb(0xFF, 0xEE, 0xAA),
            Color::Rgb(0x22, 0x22, 0x22),
            Color::Rgb(0x3A, 0x36, 0x2A),
        ),
        Theme::Mint => (
            Color::Rgb(0xDF, 0xF6, 0xE5),
            Color::Rgb(0x10, 0x22, 0x1B),
            Color::Rgb(0x1E, 0x3A, 0x2E),
        ),
    }
}

// ===== Tests =====
