//! Key mapping from terminal events to logical keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code to a logical key.
pub fn map_key(code: KeyCode) -> Option<Key> {
    match code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Key::Down),

        // State keys
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::S),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Key::R),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Key::M),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Q),

        _ => None,
    }
}

/// Ctrl-C always leaves, whatever screen is active.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
