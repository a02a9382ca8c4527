//! Countdown overlay shown before playback starts.

use super::constants::{COUNTDOWN_BOX_HEIGHT, COUNTDOWN_BOX_WIDTH};
use super::styles::Palette;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// Boxed number of seconds left, centered in the area.
#[derive(Debug, Clone, Copy)]
pub struct CountdownOverlay {
    remaining: u32,
    palette: Palette,
}

impl CountdownOverlay {
    /// Overlay showing `remaining` seconds.
    pub fn new(remaining: u32, palette: Palette) -> Self {
        Self { remaining, palette }
    }
}

impl Widget for CountdownOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = COUNTDOWN_BOX_WIDTH.min(area.width);
        let height = COUNTDOWN_BOX_HEIGHT.min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        Clear.render(popup, buf);
        Paragraph::new(self.remaining.to_string())
            .alignment(Alignment::Center)
            .style(self.palette.accent)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.palette.accent),
            )
            .render(popup, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Theme;
    use crate::view::styles::ColorConfig;

    #[test]
    fn number_is_centered() {
        let area = Rect::new(0, 0, 21, 9);
        let mut buf = Buffer::empty(area);
        CountdownOverlay::new(3, Palette::new(Theme::Dark, ColorConfig::new(false)))
            .render(area, &mut buf);

        // Box spans x 5..16, y 3..6; the digit sits in the middle row.
        assert_eq!(buf[(10, 4)].symbol(), "3");
        assert_eq!(buf[(5, 3)].symbol(), "┌");
    }
}
