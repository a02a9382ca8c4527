//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent presenter intent, not specific keys. The mapping from
/// `crossterm::event::KeyEvent` to `KeyAction` is handled by `KeyBindings`,
/// and the mapping from `KeyAction` to engine commands by `state::key_handler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Playback
    /// Start, or pause when already playing. Default: Space
    TogglePlay,
    /// Stop and return to the top. Default: Esc/s
    Stop,
    /// Jump to the top without changing phase. Default: 0/Home
    Rewind,

    // Speed
    /// Increase scroll speed by one step. Default: ↑
    SpeedUp,
    /// Decrease scroll speed by one step. Default: ↓
    SpeedDown,
    /// Fit speed to the current target duration. Default: r
    FitToTarget,
    /// Open the target duration prompt. Default: t
    PromptTarget,

    // Jumps
    /// Small backward jump. Default: ←
    NudgeBack,
    /// Small forward jump. Default: →
    NudgeForward,
    /// Large backward jump. Default: Page Up
    PageBack,
    /// Large forward jump. Default: Page Down
    PageForward,
    /// Open the go-to-percentage prompt. Default: g
    PromptPercent,

    // Layout
    /// Increase font size. Default: +/=
    FontLarger,
    /// Decrease font size. Default: -
    FontSmaller,
    /// Increase line spacing. Default: ]
    SpacingUp,
    /// Decrease line spacing. Default: [
    SpacingDown,
    /// Widen the horizontal margins. Default: >
    MarginWider,
    /// Narrow the horizontal margins. Default: <
    MarginNarrower,

    // Display
    /// Toggle horizontal mirroring for beam-splitter glass. Default: m
    ToggleMirror,
    /// Toggle the reading focus band. Default: b
    ToggleFocusBand,
    /// Cycle through colour themes. Default: c
    CycleTheme,

    // Application
    /// Open the load-script prompt. Default: o
    PromptOpen,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
}

impl KeyAction {
    /// True for actions that change layout metrics and therefore go through the
    /// relayout debouncer.
    pub fn is_layout_action(self) -> bool {
        matches!(
            self,
            KeyAction::FontLarger
                | KeyAction::FontSmaller
                | KeyAction::SpacingUp
                | KeyAction::SpacingDown
                | KeyAction::MarginWider
                | KeyAction::MarginNarrower
        )
    }
}
