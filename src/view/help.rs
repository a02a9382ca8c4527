//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by category.
//! Triggered by '?' key, dismissed by 'Esc' or '?'.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Playback",
        &[
            ("Space", "Play / pause (stops a countdown)"),
            ("Esc/s", "Stop and return to top"),
            ("0/Home", "Rewind to top"),
        ],
    ),
    (
        "Speed",
        &[
            ("↑/↓", "Faster / slower"),
            ("t", "Set target time"),
            ("r", "Fit speed to target time"),
        ],
    ),
    (
        "Position",
        &[
            ("←/→", "Nudge back / forward"),
            ("PgUp/PgDn", "Page back / forward"),
            ("g", "Go to percentage"),
        ],
    ),
    (
        "Layout",
        &[
            ("+/-", "Larger / smaller font"),
            ("]/[", "More / less line spacing"),
            (">/<", "Wider / narrower margins"),
        ],
    ),
    (
        "Display",
        &[
            ("m", "Mirror"),
            ("b", "Focus band"),
            ("c", "Cycle theme"),
        ],
    ),
    (
        "Application",
        &[
            ("o", "Open script"),
            ("?", "Toggle this help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, palette: Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.accent),
        )
        .style(palette.text)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);

    let hint_area = Rect {
        x: popup_area.x,
        y: popup_area.y + popup_area.height.saturating_sub(1),
        width: popup_area.width,
        height: 1,
    };
    let hint = Paragraph::new(Line::from(Span::styled(
        " Press Esc or ? to close ",
        palette.text.add_modifier(Modifier::DIM),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(hint, hint_area);
}

/// Rect of `percent_x` by `percent_y` of `area`, centered in it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

fn build_help_content(palette: Palette) -> Vec<Line<'static>> {
    let header = palette.accent.add_modifier(Modifier::UNDERLINED);
    let key = palette.accent;

    let mut lines = Vec::new();
    for (i, (title, entries)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, header)));
        for (keys, description) in entries.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<11}"), key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}
