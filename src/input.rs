//! Keyboard mapping for the terminal frontend.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Start, flap, or restart depending on phase.
    Tap,
    /// The restart control on the game-over screen.
    Restart,
    Quit,
    Ignore,
}

pub fn map_key(key: KeyEvent) -> KeyAction {
    // Key repeat and release events would double-flap on some terminals
    if key.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
            KeyAction::Tap
        }
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}
