//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Defaults follow common teleprompter conventions: Space plays and pauses,
/// arrows change speed and nudge, punctuation keys adjust typography.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers are compared. Terminals disagree on whether
    /// shifted punctuation (`?`, `+`, `>`) carries the SHIFT modifier, so a
    /// character with SHIFT falls back to the unmodified binding.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let normalized = KeyEvent::new(key.code, key.modifiers);
        if let Some(action) = self.bindings.get(&normalized) {
            return Some(*action);
        }
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers == KeyModifiers::SHIFT {
            return self
                .bindings
                .get(&KeyEvent::new(key.code, KeyModifiers::NONE))
                .copied();
        }
        None
    }

    /// Bind `key` to `action`, replacing any existing binding.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let plain = |code| KeyEvent::new(code, KeyModifiers::NONE);

        // Playback
        bindings.insert(plain(KeyCode::Char(' ')), KeyAction::TogglePlay);
        bindings.insert(plain(KeyCode::Esc), KeyAction::Stop);
        bindings.insert(plain(KeyCode::Char('s')), KeyAction::Stop);
        bindings.insert(plain(KeyCode::Char('0')), KeyAction::Rewind);
        bindings.insert(plain(KeyCode::Home), KeyAction::Rewind);

        // Speed
        bindings.insert(plain(KeyCode::Up), KeyAction::SpeedUp);
        bindings.insert(plain(KeyCode::Down), KeyAction::SpeedDown);
        bindings.insert(plain(KeyCode::Char('r')), KeyAction::FitToTarget);
        bindings.insert(plain(KeyCode::Char('t')), KeyAction::PromptTarget);

        // Jumps
        bindings.insert(plain(KeyCode::Left), KeyAction::NudgeBack);
        bindings.insert(plain(KeyCode::Right), KeyAction::NudgeForward);
        bindings.insert(plain(KeyCode::PageUp), KeyAction::PageBack);
        bindings.insert(plain(KeyCode::PageDown), KeyAction::PageForward);
        bindings.insert(plain(KeyCode::Char('g')), KeyAction::PromptPercent);

        // Layout
        bindings.insert(plain(KeyCode::Char('+')), KeyAction::FontLarger);
        bindings.insert(plain(KeyCode::Char('=')), KeyAction::FontLarger);
        bindings.insert(plain(KeyCode::Char('-')), KeyAction::FontSmaller);
        bindings.insert(plain(KeyCode::Char(']')), KeyAction::SpacingUp);
        bindings.insert(plain(KeyCode::Char('[')), KeyAction::SpacingDown);
        bindings.insert(plain(KeyCode::Char('>')), KeyAction::MarginWider);
        bindings.insert(plain(KeyCode::Char('<')), KeyAction::MarginNarrower);

        // Display
        bindings.insert(plain(KeyCode::Char('m')), KeyAction::ToggleMirror);
        bindings.insert(plain(KeyCode::Char('b')), KeyAction::ToggleFocusBand);
        bindings.insert(plain(KeyCode::Char('c')), KeyAction::CycleTheme);

        // Application controls
        bindings.insert(plain(KeyCode::Char('o')), KeyAction::PromptOpen);
        bindings.insert(plain(KeyCode::Char('q')), KeyAction::Quit);
        bindings.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit,
        );
        bindings.insert(plain(KeyCode::Char('?')), KeyAction::Help);

        Self { bindings }
    }
}
