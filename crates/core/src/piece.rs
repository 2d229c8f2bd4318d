//! Piece module - the falling tetromino and the moves applied to it
//!
//! Every move computes a candidate (position or shape) first and commits it only
//! when [`can_place`] accepts it, so a live piece never sits in a colliding state.
//! Rejected moves are not errors; they report `false` and leave the piece as it was.

use crate::board::Board;
use crate::shapes::Shape;
use crate::types::{Color, Handedness, PieceKind, COLS, ROWS};

/// Top-left anchor of the shape mask.
///
/// `x` is the board column of the mask's left edge. `y` is the depth of the mask's
/// top edge below the top row of the board (0 = top row, grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Spawn depth for every piece
pub const SPAWN_Y: i8 = 0;

/// Horizontal direction for one-column moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn dx(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Active tetromino (falling or preview)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tetromino {
    kind: PieceKind,
    rotation: u8,
    color: Color,
    position: Position,
    shape: Shape,
}

impl Tetromino {
    /// Create a piece at its spawn position in rotation 0
    pub fn spawn(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            rotation: 0,
            color,
            position: spawn_position(kind),
            shape: Shape::of(kind, 0),
        }
    }

    /// Create a piece at an arbitrary position (fixtures, previews)
    pub fn at(kind: PieceKind, rotation: u8, color: Color, position: Position) -> Self {
        let rotation = rotation % 4;
        Self {
            kind,
            rotation,
            color,
            position,
            shape: Shape::of(kind, rotation),
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Occupied cells as `(col, depth)` in piece space
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let Position { x, y } = self.position;
        self.shape.cells().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Spawn anchor for a kind. The I bar sits one column further right.
pub fn spawn_position(kind: PieceKind) -> Position {
    let half = (COLS / 2) as i8;
    match kind {
        PieceKind::I => Position::new(half - 2, SPAWN_Y),
        _ => Position::new(half - 3, SPAWN_Y),
    }
}

/// Whether `shape` anchored at `position` fits on `board`.
///
/// Fails when a square lies outside columns `[0, COLS)`, below the floor, or on an
/// occupied cell. Squares above the top row are in range and never collide.
pub fn can_place(shape: &Shape, position: Position, board: &Board) -> bool {
    for (dx, dy) in shape.cells() {
        let col = position.x + dx;
        let depth = position.y + dy;
        if col < 0 || col >= COLS as i8 || depth >= ROWS as i8 {
            return false;
        }
        if board.is_occupied(col, Board::row_at_depth(depth)) {
            return false;
        }
    }
    true
}

/// Shift one column. Returns whether the piece moved.
pub fn move_horizontal(piece: &mut Tetromino, board: &Board, direction: Direction) -> bool {
    let candidate = piece.position.offset(direction.dx(), 0);
    if !can_place(&piece.shape, candidate, board) {
        return false;
    }
    piece.position = candidate;
    true
}

/// Descend one row. Returns `true` when the piece is resting (the move was refused).
pub fn move_down(piece: &mut Tetromino, board: &Board) -> bool {
    let candidate = piece.position.offset(0, 1);
    if !can_place(&piece.shape, candidate, board) {
        return true;
    }
    piece.position = candidate;
    false
}

/// Whether one more row of descent would be accepted
pub fn can_move_down(piece: &Tetromino, board: &Board) -> bool {
    can_place(&piece.shape, piece.position.offset(0, 1), board)
}

/// Rotate in place (no wall kicks). Returns whether the rotation was committed.
pub fn rotate(piece: &mut Tetromino, board: &Board, handedness: Handedness) -> bool {
    let rotation = (piece.rotation as i8 + handedness.step()).rem_euclid(4) as u8;
    let candidate = Shape::of(piece.kind, rotation);
    if !can_place(&candidate, piece.position, board) {
        return false;
    }
    piece.rotation = rotation;
    piece.shape = candidate;
    true
}

/// Write the piece's squares into the board.
///
/// Squares above the top row are dropped; the game-over check catches that case
/// on the next spawn.
pub fn lock_piece(piece: &Tetromino, board: &mut Board) {
    for (col, depth) in piece.cells() {
        board.set(col, Board::row_at_depth(depth), Some(piece.color));
    }
}

/// A piece still at its spawn depth that already collides there.
pub fn is_game_over(piece: &Tetromino, board: &Board) -> bool {
    piece.position.y == SPAWN_Y && !can_place(&piece.shape, piece.position, board)
}
