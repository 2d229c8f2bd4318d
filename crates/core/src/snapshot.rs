//! Read-only copy of a session, published once per cycle.

use crate::board::Board;
use crate::piece::Tetromino;
use crate::scoring::Score;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub board: Board,
    pub falling: Option<Tetromino>,
    pub preview: Option<Tetromino>,
    pub score: Score,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board.clear();
        self.falling = None;
        self.preview = None;
        self.score = Score::default();
        self.game_over = false;
    }
}
