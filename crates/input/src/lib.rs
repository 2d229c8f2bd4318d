//! Terminal input module (task-facing).
//!
//! Maps `crossterm` events into a per-key pressed snapshot plus raw mouse state,
//! and provides the press-edge debouncer the tasks apply on top. Works in
//! terminals without key-release events by timing keys out.

pub mod debounce;
pub mod keys;
pub mod map;
pub mod poller;

pub use tasktris_types as types;

pub use debounce::{Debouncer, KeyEdges};
pub use keys::{InputState, KeySnapshot, MouseState};
pub use map::{is_interrupt, map_key};
pub use poller::InputPoller;
