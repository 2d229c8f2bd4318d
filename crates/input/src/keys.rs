//! Per-poll input snapshot shared by every consumer task.

use crate::types::Key;

/// Pressed / not-pressed state of every logical key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeySnapshot {
    pressed: [bool; Key::COUNT],
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed[key.slot()]
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        self.pressed[key.slot()] = pressed;
    }

    /// Drop a level-triggered key after it has been consumed
    pub fn clear(&mut self, key: Key) {
        self.set(key, false);
    }
}

/// Raw mouse position in canvas units plus the left button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub left_down: bool,
}

impl MouseState {
    /// Left button held inside the rectangle
    pub fn pressed_in(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        self.left_down && self.x >= x && self.x < x + w && self.y >= y && self.y < y + h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub keys: KeySnapshot,
    pub mouse: MouseState,
}
