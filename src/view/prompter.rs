//! The scrolling script itself.
//!
//! The widget draws the rows of the wrapped script starting at the scroll
//! position. Mirrored output reverses each line and right-aligns it inside the
//! reading column so it reads correctly off beam-splitter glass.

use super::constants::{FOCUS_BAND_BOTTOM_PERCENT, FOCUS_BAND_TOP_PERCENT};
use super::styles::Palette;
use crate::layout::WrappedScript;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Shown in place of an empty script.
pub const EMPTY_SCRIPT_TEXT: &str = "(empty script)";

/// Prompter widget.
#[derive(Debug, Clone, Copy)]
pub struct PrompterView<'a> {
    wrapped: &'a WrappedScript,
    position: f64,
    mirrored: bool,
    focus_band: bool,
    palette: Palette,
}

impl<'a> PrompterView<'a> {
    /// Draw `wrapped` scrolled to `position` rows.
    pub fn new(wrapped: &'a WrappedScript, position: f64, palette: Palette) -> Self {
        Self {
            wrapped,
            position,
            mirrored: false,
            focus_band: false,
            palette,
        }
    }

    /// Mirror horizontally.
    pub fn mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    /// Highlight the reading band.
    pub fn focus_band(mut self, focus_band: bool) -> Self {
        self.focus_band = focus_band;
        self
    }
}

impl Widget for PrompterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, self.palette.text);

        let band = self.focus_band.then(|| focus_band_rect(area));
        if let Some(band) = band {
            buf.set_style(band, self.palette.band);
        }

        if self.wrapped.is_empty() {
            let width = EMPTY_SCRIPT_TEXT.width() as u16;
            let x = area.x + area.width.saturating_sub(width) / 2;
            let y = area.y + area.height / 2;
            buf.set_stringn(
                x,
                y,
                EMPTY_SCRIPT_TEXT,
                usize::from(area.width),
                self.palette.text.add_modifier(Modifier::DIM),
            );
            return;
        }

        let first_row = self.position.max(0.0).floor() as usize;
        let columns = self.wrapped.columns();
        let left = self.wrapped.left();
        let mirror_left = usize::from(area.width).saturating_sub(left + columns);

        for (row, line) in self.wrapped.visible(first_row, usize::from(area.height)) {
            let y = area.y + (row - first_row) as u16;
            let style = match band {
                Some(band) if y >= band.top() && y < band.bottom() => self.palette.band,
                _ => self.palette.text,
            };

            let width = line.width().min(columns);
            let (text, offset) = if self.mirrored {
                (line.chars().rev().collect::<String>(), mirror_left + columns - width)
            } else {
                (line.to_string(), left)
            };
            if offset >= usize::from(area.width) {
                continue;
            }
            buf.set_stringn(
                area.x + offset as u16,
                y,
                text,
                usize::from(area.width) - offset,
                style,
            );
        }
    }
}

/// Rows of `area` covered by the focus band. At least one row tall.
pub fn focus_band_rect(area: Rect) -> Rect {
    let top = area.height * FOCUS_BAND_TOP_PERCENT / 100;
    let bottom = (area.height * FOCUS_BAND_BOTTOM_PERCENT / 100).max(top + 1);
    Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: bottom.min(area.height) - top.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::TerminalLayout;
    use crate::model::{LayoutMetrics, Margins, Script, Viewport};
    use crate::model::Theme;
    use crate::view::styles::ColorConfig;

    fn wrapped(text: &str, columns: u16, rows: u16) -> WrappedScript {
        let metrics = LayoutMetrics::new(Viewport::new(columns, rows))
            .with_font_size(32)
            .with_line_spacing(1.0)
            .with_margins(Margins {
                horizontal: 0,
                vertical: 0,
            });
        TerminalLayout::default().wrap(&Script::new(text), &metrics)
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    fn palette() -> Palette {
        Palette::new(Theme::Dark, ColorConfig::new(false))
    }

    #[test]
    fn draws_rows_from_position() {
        let w = wrapped("alpha\nbeta\ngamma\ndelta", 20, 3);
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);

        PrompterView::new(&w, 1.7, palette()).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0).trim_end(), "beta");
        assert_eq!(row_text(&buf, 1).trim_end(), "gamma");
        assert_eq!(row_text(&buf, 2).trim_end(), "delta");
    }

    #[test]
    fn mirrored_lines_are_reversed_and_right_aligned() {
        let w = wrapped("abc", 10, 2);
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);

        PrompterView::new(&w, 0.0, palette())
            .mirrored(true)
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "       cba");
    }

    #[test]
    fn empty_script_shows_placeholder() {
        let w = wrapped("   ", 40, 5);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);

        PrompterView::new(&w, 0.0, palette()).render(area, &mut buf);

        assert!(row_text(&buf, 2).contains(EMPTY_SCRIPT_TEXT));
    }

    #[test]
    fn focus_band_covers_upper_fifth() {
        let band = focus_band_rect(Rect::new(0, 0, 80, 20));
        assert_eq!((band.y, band.height), (2, 4));
    }

    #[test]
    fn focus_band_is_never_empty() {
        let band = focus_band_rect(Rect::new(0, 0, 80, 3));
        assert_eq!(band.height, 1);
    }
}
