//! Terminal drawing module.
//!
//! Implements the engine's drawing boundary over a framebuffer of styled
//! character cells and flushes it to the terminal with crossterm.
//!
//! - [`fb`]: the framebuffer, with clipped signed-coordinate writes
//! - [`canvas`]: [`TerminalCanvas`], the `Canvas` the tasks draw into
//! - [`renderer`]: diffing renderer that owns raw mode and mouse capture

pub mod canvas;
pub mod fb;
pub mod renderer;

pub use tasktris_engine as engine;
pub use tasktris_types as types;

pub use canvas::TerminalCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
