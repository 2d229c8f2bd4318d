//! Terminal input poller.
//!
//! Folds crossterm events into an [`InputState`]. Terminals often emit no key
//! release events, so a key that has not been seen for a short timeout counts as
//! released. Auto-repeat events refresh the key, which keeps a held key pressed.

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};

use crate::keys::InputState;
use crate::map::{is_interrupt, map_key};
use crate::types::Key;

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

#[derive(Debug, Clone)]
pub struct InputPoller {
    state: InputState,
    last_seen: [Option<Instant>; Key::COUNT],
    release_timeout: Duration,
    interrupted: bool,
}

impl InputPoller {
    pub fn new() -> Self {
        Self {
            state: InputState::default(),
            last_seen: [None; Key::COUNT],
            release_timeout: Duration::from_millis(DEFAULT_KEY_RELEASE_TIMEOUT_MS),
            interrupted: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.release_timeout = Duration::from_millis(timeout_ms);
        self
    }

    /// Fold one terminal event into the snapshot.
    pub fn handle_event(&mut self, event: &Event, now: Instant) {
        match event {
            Event::Key(key) => {
                if is_interrupt(*key) {
                    self.interrupted = true;
                    return;
                }
                let Some(logical) = map_key(key.code) else {
                    return;
                };
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        self.state.keys.set(logical, true);
                        self.last_seen[logical.slot()] = Some(now);
                    }
                    KeyEventKind::Release => {
                        self.state.keys.set(logical, false);
                        self.last_seen[logical.slot()] = None;
                    }
                }
            }
            Event::Mouse(mouse) => {
                self.state.mouse.x = mouse.column as i32;
                self.state.mouse.y = mouse.row as i32;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left)
                    | MouseEventKind::Drag(MouseButton::Left) => {
                        self.state.mouse.left_down = true;
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        self.state.mouse.left_down = false;
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }

    /// Release keys not seen within the timeout.
    pub fn expire(&mut self, now: Instant) {
        for key in Key::ALL {
            let slot = key.slot();
            if let Some(seen) = self.last_seen[slot] {
                if now.saturating_duration_since(seen) > self.release_timeout {
                    self.state.keys.set(key, false);
                    self.last_seen[slot] = None;
                }
            }
        }
    }

    /// Snapshot handed to the tasks for this frame. Consumers may clear
    /// level-triggered keys in place.
    pub fn state_mut(&mut self) -> &mut InputState {
        &mut self.state
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn interrupted(&self) -> bool {
        self.interrupted
    }
}

impl Default for InputPoller {
    fn default() -> Self {
        Self::new()
    }
}
