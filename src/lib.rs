//! Tasktris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `tasktris::{core, engine, input, opponent, term, types}`.

pub use tasktris_core as core;
pub use tasktris_engine as engine;
pub use tasktris_input as input;
pub use tasktris_opponent as opponent;
pub use tasktris_term as term;
pub use tasktris_types as types;
