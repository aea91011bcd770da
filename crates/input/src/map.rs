//! Key mapping from terminal events to game actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Action;

/// Keyboard stand-ins for the five panel buttons. Letters match either case.
pub const KEY_BINDINGS: [(KeyCode, Action); 20] = [
    (KeyCode::Up, Action::RotateRight),
    (KeyCode::Char('k'), Action::RotateRight),
    (KeyCode::Char('w'), Action::RotateRight),
    (KeyCode::Char('x'), Action::RotateRight),
    (KeyCode::Char('z'), Action::RotateLeft),
    (KeyCode::Char('y'), Action::RotateLeft),
    (KeyCode::Char('u'), Action::RotateLeft),
    (KeyCode::Left, Action::MoveLeft),
    (KeyCode::Char('h'), Action::MoveLeft),
    (KeyCode::Char('a'), Action::MoveLeft),
    (KeyCode::Right, Action::MoveRight),
    (KeyCode::Char('l'), Action::MoveRight),
    (KeyCode::Char('d'), Action::MoveRight),
    (KeyCode::Down, Action::SoftDrop),
    (KeyCode::Char('j'), Action::SoftDrop),
    (KeyCode::Char('s'), Action::SoftDrop),
    (KeyCode::Char(' '), Action::SoftDrop),
    (KeyCode::Enter, Action::SoftDrop),
    (KeyCode::PageUp, Action::RotateRight),
    (KeyCode::PageDown, Action::RotateLeft),
];

/// Map a key to the panel button it stands in for.
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    let code = match key.code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    };
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == code)
        .map(|&(_, action)| action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
