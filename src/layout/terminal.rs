//! Layout of a script on a character-cell terminal.
//!
//! Font size has no direct meaning on a terminal, so it controls the width of the
//! reading column instead: larger type means fewer words per line, as on a glass
//! prompter. Line spacing inserts blank rows between lines.

use super::wrap::wrap_text;
use super::LayoutProvider;
use crate::model::{ContentExtent, LayoutError, LayoutMetrics, Script};

/// Font size at which the reading column spans the whole usable width.
pub const FULL_WIDTH_FONT_SIZE: u16 = 32;

/// Narrowest reading column, in cells.
pub const MIN_TEXT_COLUMNS: usize = 10;

/// Lays out scripts as word-wrapped rows of terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalLayout {
    scroll_past_end: bool,
}

impl TerminalLayout {
    /// Create a layout provider.
    ///
    /// With `scroll_past_end` the script can scroll until its last line reaches the
    /// top of the screen; without it scrolling stops once the last line is visible.
    pub fn new(scroll_past_end: bool) -> Self {
        Self { scroll_past_end }
    }

    /// Width of the reading column for `metrics`.
    pub fn text_columns(metrics: &LayoutMetrics) -> usize {
        let usable = usable_columns(metrics);
        let scaled = usable * usize::from(FULL_WIDTH_FONT_SIZE) / usize::from(metrics.font_size().max(1));
        scaled.clamp(MIN_TEXT_COLUMNS, usable)
    }

    /// Wrap the script for rendering.
    pub fn wrap(&self, script: &Script, metrics: &LayoutMetrics) -> WrappedScript {
        let columns = Self::text_columns(metrics);
        let usable = usable_columns(metrics);
        let lines = if script.is_blank() {
            Vec::new()
        } else {
            wrap_text(script.text(), columns)
        };
        let left = usize::from(metrics.margins().horizontal) + (usable - columns) / 2;

        WrappedScript {
            lines,
            columns,
            left,
            top: usize::from(metrics.margins().vertical),
            line_spacing: metrics.line_spacing(),
        }
    }

    fn trailing_padding(&self, metrics: &LayoutMetrics) -> usize {
        if self.scroll_past_end {
            usize::from(metrics.viewport().rows)
                .saturating_sub(usize::from(metrics.margins().vertical))
                .saturating_sub(1)
        } else {
            0
        }
    }
}

impl Default for TerminalLayout {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LayoutProvider for TerminalLayout {
    fn measure_extent(
        &self,
        script: &Script,
        metrics: &LayoutMetrics,
    ) -> Result<ContentExtent, LayoutError> {
        let viewport = metrics.viewport();
        if viewport.is_empty() {
            return Err(LayoutError::EmptyViewport {
                columns: viewport.columns,
                rows: viewport.rows,
            });
        }

        let wrapped = self.wrap(script, metrics);
        if wrapped.is_empty() {
            return Ok(ContentExtent::ZERO);
        }

        let document = wrapped.document_rows() + self.trailing_padding(metrics);
        let overflow = document.saturating_sub(usize::from(viewport.rows));
        Ok(ContentExtent::new(overflow as f64))
    }
}

/// A script broken into display lines with their placement.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedScript {
    lines: Vec<String>,
    columns: usize,
    left: usize,
    top: usize,
    line_spacing: f64,
}

impl WrappedScript {
    /// Wrapped lines in reading order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Width of the reading column.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Screen column where the reading column starts.
    pub fn left(&self) -> usize {
        self.left
    }

    /// Document row of line `index`.
    pub fn row_of(&self, index: usize) -> usize {
        self.top + (index as f64 * self.line_spacing).floor() as usize
    }

    /// Height of the laid-out document, including both vertical margins.
    pub fn document_rows(&self) -> usize {
        if self.lines.is_empty() {
            return 2 * self.top;
        }
        let body = (self.lines.len() as f64 * self.line_spacing).ceil() as usize;
        2 * self.top + body
    }

    /// Lines whose document row falls in `first_row..first_row + rows`, with their rows.
    pub fn visible(&self, first_row: usize, rows: usize) -> impl Iterator<Item = (usize, &str)> + '_ {
        let end = first_row.saturating_add(rows);
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (self.row_of(i), line.as_str()))
            .skip_while(move |(row, _)| *row < first_row)
            .take_while(move |(row, _)| *row < end)
    }
}

fn usable_columns(metrics: &LayoutMetrics) -> usize {
    let total = usize::from(metrics.viewport().columns);
    let margins = 2 * usize::from(metrics.margins().horizontal);
    total.saturating_sub(margins).max(MIN_TEXT_COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Margins, Viewport};

    fn metrics(columns: u16, rows: u16) -> LayoutMetrics {
        LayoutMetrics::new(Viewport::new(columns, rows))
            .with_font_size(FULL_WIDTH_FONT_SIZE)
            .with_line_spacing(1.0)
            .with_margins(Margins {
                horizontal: 0,
                vertical: 0,
            })
    }

    fn numbered_lines(n: usize) -> Script {
        let text: Vec<String> = (0..n).map(|i| format!("line{i}")).collect();
        Script::new(text.join("\n"))
    }

    #[test]
    fn zero_viewport_is_an_error() {
        let result = TerminalLayout::default().measure_extent(&numbered_lines(3), &metrics(0, 10));
        assert_eq!(
            result,
            Err(LayoutError::EmptyViewport {
                columns: 0,
                rows: 10
            })
        );
    }

    #[test]
    fn empty_script_has_zero_extent() {
        let extent = TerminalLayout::default()
            .measure_extent(&Script::new("  \n "), &metrics(40, 10))
            .unwrap();
        assert!(extent.is_empty());
    }

    #[test]
    fn short_script_without_padding_does_not_scroll() {
        let extent = TerminalLayout::new(false)
            .measure_extent(&numbered_lines(5), &metrics(40, 10))
            .unwrap();
        assert!(extent.is_empty());
    }

    #[test]
    fn long_script_without_padding_scrolls_by_overflow() {
        let extent = TerminalLayout::new(false)
            .measure_extent(&numbered_lines(30), &metrics(40, 10))
            .unwrap();
        assert_eq!(extent.total(), 20.0);
    }

    #[test]
    fn scroll_past_end_lets_last_line_reach_top() {
        // 30 lines + 9 rows of padding - 10 visible rows.
        let extent = TerminalLayout::new(true)
            .measure_extent(&numbered_lines(30), &metrics(40, 10))
            .unwrap();
        assert_eq!(extent.total(), 29.0);
    }

    #[test]
    fn larger_font_narrows_column_and_grows_extent() {
        let script = Script::new("word ".repeat(200));
        let layout = TerminalLayout::new(false);
        let small = layout.measure_extent(&script, &metrics(80, 20)).unwrap();
        let large = layout
            .measure_extent(&script, &metrics(80, 20).with_font_size(128))
            .unwrap();
        assert!(large > small, "{large:?} should exceed {small:?}");
    }

    #[test]
    fn line_spacing_spreads_rows() {
        let wrapped = TerminalLayout::default().wrap(&numbered_lines(4), &metrics(40, 10).with_line_spacing(1.5));
        let rows: Vec<usize> = (0..4).map(|i| wrapped.row_of(i)).collect();
        assert_eq!(rows, vec![0, 1, 3, 4]);
        assert_eq!(wrapped.document_rows(), 6);
    }

    #[test]
    fn reading_column_is_centered() {
        let m = metrics(80, 10).with_font_size(64);
        let wrapped = TerminalLayout::default().wrap(&numbered_lines(1), &m);
        assert_eq!(wrapped.columns(), 40);
        assert_eq!(wrapped.left(), 20);
    }

    #[test]
    fn visible_selects_window() {
        let wrapped = TerminalLayout::default().wrap(&numbered_lines(10), &metrics(40, 10));
        let shown: Vec<&str> = wrapped.visible(3, 2).map(|(_, l)| l).collect();
        assert_eq!(shown, vec!["line3", "line4"]);
    }
}
