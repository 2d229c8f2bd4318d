//! Press-edge detection.
//!
//! A debounced key reports `true` only on the poll where it goes from released to
//! pressed. Holding it reports nothing further until it is released and pressed
//! again.

use crate::keys::KeySnapshot;
use crate::types::Key;

/// Edge detector for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Debouncer {
    last: bool,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current level. Returns `true` on a press edge.
    pub fn update(&mut self, pressed: bool) -> bool {
        let edge = pressed && !self.last;
        self.last = pressed;
        edge
    }
}

/// Edge detector over a whole key snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyEdges {
    last: KeySnapshot,
}

impl KeyEdges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys that were pressed on this poll but not on the previous one.
    pub fn sample(&mut self, keys: &KeySnapshot) -> KeySnapshot {
        let mut edges = KeySnapshot::new();
        for key in Key::ALL {
            if keys.is_pressed(key) && !self.last.is_pressed(key) {
                edges.set(key, true);
            }
        }
        self.last = *keys;
        edges
    }
}
