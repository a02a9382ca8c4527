//! One-line prompt drawn over the status bar.

use super::styles::Palette;
use crate::state::PromptState;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Prompt input widget. Renders nothing when no prompt is open.
#[derive(Debug, Clone, Copy)]
pub struct PromptInput<'a> {
    state: &'a PromptState,
    palette: Palette,
}

impl<'a> PromptInput<'a> {
    /// Build the widget.
    pub fn new(state: &'a PromptState, palette: Palette) -> Self {
        Self { state, palette }
    }

    /// Terminal cursor position for the open prompt.
    pub fn cursor_position(&self, area: Rect) -> Option<Position> {
        let PromptState::Typing {
            kind,
            input,
            cursor,
        } = self.state
        else {
            return None;
        };
        let before: String = input.chars().take(*cursor).collect();
        let x = prefix(kind.label()).width() + before.width();
        let x = area.x.saturating_add(x as u16).min(area.right().saturating_sub(1));
        Some(Position::new(x, area.y))
    }
}

impl Widget for PromptInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let PromptState::Typing { kind, input, .. } = self.state else {
            return;
        };
        Paragraph::new(Line::from(vec![
            Span::styled(prefix(kind.label()), self.palette.accent),
            Span::raw(input.as_str()),
        ]))
        .style(self.palette.status)
        .render(area, buf);
    }
}

fn prefix(label: &str) -> String {
    format!(" {label}: ")
}
