//! The four tasks. Menu, Game and Pause each own one application state and only
//! run while it is active; Score runs every frame.

pub mod game;
pub mod menu;
pub mod pause;
pub mod score;

pub use game::{draw_game, GameTask};
pub use menu::MenuTask;
pub use pause::PauseTask;
pub use score::ScoreTask;
