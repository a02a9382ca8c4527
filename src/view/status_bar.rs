//! Status bar: phase, speed, progress and time left.

use super::styles::Palette;
use crate::engine::Snapshot;
use crate::model::LayoutMetrics;
use crate::state::{StatusKind, StatusMessage};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Bottom line of the screen.
#[derive(Debug, Clone, Copy)]
pub struct StatusBar<'a> {
    snapshot: &'a Snapshot,
    metrics: &'a LayoutMetrics,
    label: Option<&'a str>,
    message: Option<&'a StatusMessage>,
    palette: Palette,
}

impl<'a> StatusBar<'a> {
    /// Build a status bar.
    pub fn new(snapshot: &'a Snapshot, metrics: &'a LayoutMetrics, palette: Palette) -> Self {
        Self {
            snapshot,
            metrics,
            label: None,
            message: None,
            palette,
        }
    }

    /// Script name shown at the end.
    pub fn label(mut self, label: Option<&'a str>) -> Self {
        self.label = label;
        self
    }

    /// Message shown instead of the script name.
    pub fn message(mut self, message: Option<&'a StatusMessage>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(status_text(self.snapshot, self.metrics))];
        match self.message {
            Some(message) => {
                let style = match message.kind {
                    StatusKind::Info => self.palette.status,
                    StatusKind::Error => self.palette.error,
                };
                spans.push(Span::raw(" │ "));
                spans.push(Span::styled(message.text.clone(), style));
            }
            None => {
                if let Some(label) = self.label {
                    spans.push(Span::raw(format!(" │ {label}")));
                }
            }
        }

        Paragraph::new(Line::from(spans))
            .style(self.palette.status)
            .render(area, buf);
    }
}

/// Fixed part of the status line.
///
/// ```
/// use tprompt::engine::{PlaybackPhase, Snapshot};
/// use tprompt::model::LayoutMetrics;
/// use tprompt::view::status_bar::status_text;
///
/// let snapshot = Snapshot {
///     phase: PlaybackPhase::Playing,
///     position: 50.0,
///     extent: 200.0,
///     velocity: 2.0,
///     fit_active: true,
///     mirrored: false,
///     countdown_remaining: None,
/// };
/// let text = status_text(&snapshot, &LayoutMetrics::default());
/// assert!(text.contains("PLAYING"));
/// assert!(text.contains("25%"));
/// assert!(text.contains("1:15 left"));
/// ```
pub fn status_text(snapshot: &Snapshot, metrics: &LayoutMetrics) -> String {
    let mut parts = vec![
        format!(" {}", snapshot.phase.label()),
        format!(
            "{:.2} rows/s{}",
            snapshot.velocity,
            if snapshot.fit_active { " FIT" } else { "" }
        ),
        format!("{:.0}%", snapshot.progress() * 100.0),
    ];
    if let Some(eta) = snapshot.eta_seconds() {
        parts.push(format!("{} left", format_clock(eta)));
    }
    parts.push(format!(
        "{} {}pt ×{:.1}",
        metrics.font_family(),
        metrics.font_size(),
        metrics.line_spacing()
    ));
    if snapshot.mirrored {
        parts.push("MIRROR".to_string());
    }
    parts.join(" │ ")
}

/// Format seconds as `M:SS` or `H:MM:SS`, rounding up.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).ceil() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PlaybackPhase;

    fn snapshot() -> Snapshot {
        Snapshot {
            phase: PlaybackPhase::Paused,
            position: 0.0,
            extent: 100.0,
            velocity: 1.5,
            fit_active: false,
            mirrored: true,
            countdown_remaining: None,
        }
    }

    #[test]
    fn clock_formats() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(59.2), "1:00");
        assert_eq!(format_clock(3723.0), "1:02:03");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
    }

    #[test]
    fn status_text_shows_mirror_and_phase() {
        let text = status_text(&snapshot(), &LayoutMetrics::default());
        assert!(text.starts_with(" PAUSED"), "got: {text}");
        assert!(text.ends_with("MIRROR"), "got: {text}");
        assert!(!text.contains("FIT"), "got: {text}");
    }

    #[test]
    fn zero_velocity_hides_eta() {
        let snapshot = Snapshot {
            velocity: 0.0,
            ..snapshot()
        };
        let text = status_text(&snapshot, &LayoutMetrics::default());
        assert!(!text.contains("left"), "got: {text}");
    }
}
