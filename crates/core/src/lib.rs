//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board rules and the piece sources. It has
//! **zero dependencies** on drawing, networking, or timing, making it:
//!
//! - **Deterministic**: a seeded bag produces the same sequence every time
//! - **Testable**: every rule is a plain function over plain data
//! - **Fast**: zero-allocation board and piece operations
//!
//! # Module Structure
//!
//! - [`board`]: 10x16 board, rows counted up from the floor, line clearing
//! - [`shapes`]: 5x5 masks for the seven kinds in four rotations
//! - [`piece`]: the falling piece and its commit-on-success moves
//! - [`scoring`]: line-clear points, levels and the high-score table
//! - [`generator`]: fair bag and remote piece feed
//! - [`link`]: the port through which tasks talk to the opponent link
//! - [`snapshot`]: per-cycle published copy of a session
//!
//! # Example
//!
//! ```
//! use tasktris_core::{move_down, lock_piece, Board, Tetromino};
//! use tasktris_core::types::{Color, PieceKind};
//!
//! let mut board = Board::new();
//! let mut piece = Tetromino::spawn(PieceKind::I, Color::Blue);
//! while !move_down(&mut piece, &board) {}
//! lock_piece(&piece, &mut board);
//!
//! assert_eq!(board.filled(), 4);
//! assert!(board.is_occupied(3, 0));
//! ```

pub mod board;
pub mod generator;
pub mod link;
pub mod piece;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use tasktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use generator::{FairBag, PieceSource, RemoteFeed};
pub use link::{LinkRequest, LinkStatus, Offline, OpponentPort};
pub use piece::{
    can_move_down, can_place, is_game_over, lock_piece, move_down, move_horizontal, rotate,
    spawn_position, Direction, Position, Tetromino,
};
pub use scoring::{calculate_line_score, HighScores, Score};
pub use shapes::Shape;
pub use snapshot::GameSnapshot;
