//! Engine module - tasks, timers and the application state machine
//!
//! Everything here runs on a single thread, one frame at a time. A frame is one
//! scheduling round over the tasks; no task blocks.
//!
//! # Module Structure
//!
//! - [`mailbox`]: single-slot queues and latched signals between tasks
//! - [`settings`]: timing constants, overridable from JSON
//! - [`timers`]: countdown timers and the fall/lock pair
//! - [`session`]: one gameplay cycle per frame
//! - [`state_machine`]: `Menu -> Game -> Pause` ring with rate-limited transitions
//! - [`canvas`]: drawing boundary, sprites and button helper
//! - [`tasks`]: Menu, Game, Pause and Score tasks
//! - [`app`]: the scheduler tying it all together
//!
//! # Timing
//!
//! - **Frame**: 20ms
//! - **Fall**: 500ms at level 0, 40ms faster per level, never below 50ms
//! - **Lock delay**: 300ms at level 0, same step and floor
//! - **State changes**: at most one per 300ms

pub mod app;
pub mod canvas;
pub mod mailbox;
pub mod session;
pub mod settings;
pub mod shared;
pub mod state_machine;
pub mod tasks;
pub mod timers;

pub use tasktris_core as core;
pub use tasktris_input as input;
pub use tasktris_types as types;

pub use app::{App, FrameOutcome};
pub use canvas::{Canvas, CanvasError, ImageHandle, Sprites};
pub use mailbox::{Mailbox, Signal};
pub use session::{CycleReport, GameSession, SessionConfig, SessionInput};
pub use settings::{Settings, SettingsError};
pub use shared::Shared;
pub use state_machine::{
    AppState, StateCommand, StateContext, StateInput, StateMachine, StateSignal, Transition,
};
pub use timers::{CountdownTimer, FallLockTimers};
