//! Keyboard input handling for the interactive UI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the UI to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyAction {
    Quit,
    Refresh,
    Ignore,
}

/// Maps a key event: `q`, Esc or Ctrl+C quit, `r` refreshes.
pub(super) fn key_action(key_event: &KeyEvent) -> KeyAction {
    if key_event.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Quit
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Refresh,
        _ => KeyAction::Ignore,
    }
}
