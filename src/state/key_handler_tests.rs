//! Tests for key action handling.

use super::*;
use crate::model::metrics::{MAX_FONT_SIZE, MIN_LINE_SPACING};
use crate::model::{Theme, Viewport};
use crate::state::app_state::StatusKind;
use crate::state::prompt::PromptState;
use std::time::Duration;

fn metrics() -> LayoutMetrics {
    LayoutMetrics::new(Viewport::new(80, 24))
}

fn ctx(phase: PlaybackPhase, metrics: &LayoutMetrics) -> KeyContext<'_> {
    KeyContext {
        phase,
        metrics,
        speed_step: 0.25,
        nudge_rows: 4.0,
    }
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// ===== playback =====

#[test]
fn toggle_play_depends_on_phase() {
    let m = metrics();
    let mut state = AppState::default();
    let cases = [
        (PlaybackPhase::Idle, Command::Start),
        (PlaybackPhase::Paused, Command::Start),
        (PlaybackPhase::Finished, Command::Start),
        (PlaybackPhase::Playing, Command::Pause),
        (PlaybackPhase::Countdown, Command::Stop),
    ];
    for (phase, expected) in cases {
        let effect = handle_key_action(&mut state, KeyAction::TogglePlay, &ctx(phase, &m));
        assert_eq!(effect, Effect::Command(expected), "phase {phase}");
    }
}

#[test]
fn speed_keys_send_signed_step() {
    let m = metrics();
    let mut state = AppState::default();
    assert_eq!(
        handle_key_action(&mut state, KeyAction::SpeedUp, &ctx(PlaybackPhase::Playing, &m)),
        Effect::Command(Command::SetSpeed(0.25))
    );
    assert_eq!(
        handle_key_action(&mut state, KeyAction::SpeedDown, &ctx(PlaybackPhase::Playing, &m)),
        Effect::Command(Command::SetSpeed(-0.25))
    );
}

#[test]
fn page_jump_is_screen_minus_overlap() {
    // GIVEN a 24-row viewport
    let m = metrics();
    let mut state = AppState::default();

    // WHEN paging forward
    let effect = handle_key_action(&mut state, KeyAction::PageForward, &ctx(PlaybackPhase::Idle, &m));

    // THEN the jump is 22 rows
    assert_eq!(effect, Effect::Command(Command::JumpBy(22.0)));
}

#[test]
fn page_jump_is_at_least_one_row() {
    let m = LayoutMetrics::new(Viewport::new(80, 2));
    let context = ctx(PlaybackPhase::Idle, &m);
    assert_eq!(context.page_rows(), 1.0);
}

#[test]
fn fit_uses_current_target() {
    let m = metrics();
    let mut state = AppState::new(Theme::Dark, 90.0);
    assert_eq!(
        handle_key_action(&mut state, KeyAction::FitToTarget, &ctx(PlaybackPhase::Idle, &m)),
        Effect::Command(Command::FitToDuration(90.0))
    );
}

// ===== layout =====

#[test]
fn font_larger_requests_relayout() {
    let m = metrics();
    let mut state = AppState::default();
    let effect = handle_key_action(&mut state, KeyAction::FontLarger, &ctx(PlaybackPhase::Playing, &m));
    assert_eq!(effect, Effect::Relayout(m.with_font_size(m.font_size() + FONT_STEP)));
}

#[test]
fn layout_key_at_limit_does_nothing() {
    // GIVEN metrics already at the largest font
    let m = metrics().with_font_size(MAX_FONT_SIZE);
    let mut state = AppState::default();

    // WHEN pressing font larger
    let effect = handle_key_action(&mut state, KeyAction::FontLarger, &ctx(PlaybackPhase::Idle, &m));

    // THEN no relayout is requested
    assert_eq!(effect, Effect::None, "Clamped metrics should not trigger a remeasure");
}

#[test]
fn spacing_down_clamps_at_minimum() {
    let m = metrics().with_line_spacing(MIN_LINE_SPACING);
    let adjusted = adjust_layout(&m, KeyAction::SpacingDown);
    assert_eq!(adjusted.line_spacing(), MIN_LINE_SPACING);
}

#[test]
fn margin_keys_change_horizontal_only() {
    let m = metrics();
    let wider = adjust_layout(&m, KeyAction::MarginWider);
    assert_eq!(wider.margins().horizontal, m.margins().horizontal + MARGIN_STEP);
    assert_eq!(wider.margins().vertical, m.margins().vertical);
}

// ===== display =====

#[test]
fn mirror_is_an_engine_command() {
    let m = metrics();
    let mut state = AppState::default();
    assert_eq!(
        handle_key_action(&mut state, KeyAction::ToggleMirror, &ctx(PlaybackPhase::Playing, &m)),
        Effect::Command(Command::ToggleMirror)
    );
}

#[test]
fn cycle_theme_updates_state_and_status() {
    let m = metrics();
    let mut state = AppState::new(Theme::Dark, 300.0);
    handle_key_action(&mut state, KeyAction::CycleTheme, &ctx(PlaybackPhase::Idle, &m));
    assert_eq!(state.theme, Theme::Amber);
    assert_eq!(state.status, Some(StatusMessage::info("Theme: amber")));
}

#[test]
fn focus_band_toggles() {
    let m = metrics();
    let mut state = AppState::default();
    let before = state.focus_band;
    handle_key_action(&mut state, KeyAction::ToggleFocusBand, &ctx(PlaybackPhase::Idle, &m));
    assert_eq!(state.focus_band, !before);
}

// ===== help =====

#[test]
fn help_swallows_other_actions() {
    // GIVEN the help overlay is open
    let m = metrics();
    let mut state = AppState::default();
    state.help_visible = true;

    // WHEN pressing play
    let effect = handle_key_action(&mut state, KeyAction::TogglePlay, &ctx(PlaybackPhase::Idle, &m));

    // THEN nothing reaches the engine and help stays open
    assert_eq!(effect, Effect::None);
    assert!(state.help_visible);
}

#[test]
fn esc_closes_help_without_stopping() {
    let m = metrics();
    let mut state = AppState::default();
    state.help_visible = true;
    let effect = handle_key_action(&mut state, KeyAction::Stop, &ctx(PlaybackPhase::Playing, &m));
    assert_eq!(effect, Effect::None, "Closing help must not stop playback");
    assert!(!state.help_visible);
}

#[test]
fn quit_works_with_help_open() {
    let m = metrics();
    let mut state = AppState::default();
    state.help_visible = true;
    assert_eq!(
        handle_key_action(&mut state, KeyAction::Quit, &ctx(PlaybackPhase::Idle, &m)),
        Effect::Quit
    );
    assert!(state.should_quit);
}

// ===== prompts =====

#[test]
fn percent_prompt_round_trip() {
    // GIVEN the go-to prompt is opened
    let m = metrics();
    let mut state = AppState::default();
    handle_key_action(&mut state, KeyAction::PromptPercent, &ctx(PlaybackPhase::Paused, &m));
    assert!(state.prompt.is_active());

    // WHEN typing 75 and pressing Enter
    handle_prompt_key(&mut state, key(KeyCode::Char('7')));
    handle_prompt_key(&mut state, key(KeyCode::Char('5')));
    let effect = handle_prompt_key(&mut state, key(KeyCode::Enter));

    // THEN the engine is asked to jump to 75%
    assert_eq!(effect, Effect::Command(Command::JumpToFraction(0.75)));
    assert_eq!(state.prompt, PromptState::Inactive);
}

#[test]
fn target_prompt_updates_target_and_fits() {
    let mut state = AppState::default();
    let effect = handle_prompt_value(&mut state, PromptValue::Target(Duration::from_secs(150)));
    assert_eq!(state.target_duration_secs, 150.0);
    assert_eq!(effect, Effect::Command(Command::FitToDuration(150.0)));
}

#[test]
fn invalid_prompt_sets_error_status() {
    let m = metrics();
    let mut state = AppState::default();
    handle_key_action(&mut state, KeyAction::PromptTarget, &ctx(PlaybackPhase::Idle, &m));
    handle_prompt_key(&mut state, key(KeyCode::Char('0')));
    let effect = handle_prompt_key(&mut state, key(KeyCode::Enter));

    assert_eq!(effect, Effect::None);
    assert_eq!(state.status.as_ref().map(|s| s.kind), Some(StatusKind::Error));
}

#[test]
fn esc_cancels_prompt() {
    let m = metrics();
    let mut state = AppState::default();
    handle_key_action(&mut state, KeyAction::PromptOpen, &ctx(PlaybackPhase::Idle, &m));
    handle_prompt_key(&mut state, key(KeyCode::Char('a')));
    assert_eq!(handle_prompt_key(&mut state, key(KeyCode::Esc)), Effect::None);
    assert_eq!(state.prompt, PromptState::Inactive);
}

#[test]
fn open_prompt_yields_path_effect() {
    let m = metrics();
    let mut state = AppState::default();
    handle_key_action(&mut state, KeyAction::PromptOpen, &ctx(PlaybackPhase::Idle, &m));
    for ch in "talk.txt".chars() {
        handle_prompt_key(&mut state, key(KeyCode::Char(ch)));
    }
    assert_eq!(
        handle_prompt_key(&mut state, key(KeyCode::Enter)),
        Effect::Open(PathBuf::from("talk.txt"))
    );
}

#[test]
fn ctrl_chars_are_not_typed() {
    let mut state = AppState::default();
    state.prompt = PromptState::Typing {
        kind: PromptKind::OpenFile,
        input: String::new(),
        cursor: 0,
    };
    handle_prompt_key(&mut state, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    assert_eq!(
        state.prompt,
        PromptState::Typing {
            kind: PromptKind::OpenFile,
            input: String::new(),
            cursor: 0,
        }
    );
}
