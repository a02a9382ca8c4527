//! Layout dimension constants for TUI rendering.

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Top of the reading focus band, as a percentage of the prompter height.
pub const FOCUS_BAND_TOP_PERCENT: u16 = 10;

/// Bottom of the reading focus band, as a percentage of the prompter height.
pub const FOCUS_BAND_BOTTOM_PERCENT: u16 = 30;

/// Countdown overlay size in cells.
pub const COUNTDOWN_BOX_WIDTH: u16 = 11;
/// Countdown overlay height in cells.
pub const COUNTDOWN_BOX_HEIGHT: u16 = 3;
