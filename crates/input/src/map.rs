//! Key mapping from terminal events to drag inputs.

use crate::types::Material;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Screen-independent meaning of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Move the cursor left (previous item, bin or menu entry)
    Prev,
    /// Move the cursor right (next item, bin or menu entry)
    Next,
    /// Grab the item under the cursor, or release the held item
    Activate,
    /// Release the held item directly over a bin
    ReleaseOnto(Material),
    /// Put the held item back / go back
    Cancel,
    /// Start a fresh round
    Restart,
}

/// Map keyboard input to drag inputs.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyInput> {
    match key.code {
        // Cursor
        KeyCode::Left
        | KeyCode::Up
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A')
        | KeyCode::BackTab => Some(KeyInput::Prev),
        KeyCode::Right
        | KeyCode::Down
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D')
        | KeyCode::Tab => Some(KeyInput::Next),

        // Grab / release
        KeyCode::Char(' ') | KeyCode::Enter => Some(KeyInput::Activate),
        KeyCode::Char('1') => Some(KeyInput::ReleaseOnto(Material::Plastic)),
        KeyCode::Char('2') => Some(KeyInput::ReleaseOnto(Material::Paper)),
        KeyCode::Char('3') => Some(KeyInput::ReleaseOnto(Material::Metal)),
        KeyCode::Char('4') => Some(KeyInput::ReleaseOnto(Material::Glass)),
        KeyCode::Esc | KeyCode::Backspace => Some(KeyInput::Cancel),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyInput::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
