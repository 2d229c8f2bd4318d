//! Piece tests - shapes, commit-or-revert moves and a full drop

use tasktris::core::{
    can_place, lock_piece, move_down, move_horizontal, rotate, Board, Direction, Position, Score,
    Shape, Tetromino,
};
use tasktris::types::{Color, Handedness, PieceKind, COLS, ROWS};

// ============== Shape Tests ==============

#[test]
fn test_i_piece_shapes() {
    let flat: Vec<_> = Shape::of(PieceKind::I, 0).cells().collect();
    assert_eq!(flat, vec![(0, 2), (1, 2), (2, 2), (3, 2)]);
    let upright: Vec<_> = Shape::of(PieceKind::I, 1).cells().collect();
    assert_eq!(upright, vec![(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(Shape::of(PieceKind::I, 2), Shape::of(PieceKind::I, 0));
    assert_eq!(Shape::of(PieceKind::I, 3), Shape::of(PieceKind::I, 1));
}

#[test]
fn test_i_piece_turns_in_place() {
    let board = Board::new();
    let mut piece = Tetromino::at(PieceKind::I, 0, Color::Blue, Position::new(3, 5));
    let mut columns = Vec::new();
    for _ in 0..4 {
        assert!(rotate(&mut piece, &board, Handedness::Right));
        if piece.rotation() % 2 == 1 {
            columns.push(piece.cells().map(|(col, _)| col).min());
        }
    }
    // both upright states use the same column
    assert_eq!(columns, vec![Some(5), Some(5)]);
    assert_eq!(piece.rotation(), 0);
}

#[test]
fn test_o_piece_never_changes() {
    let north = Shape::of(PieceKind::O, 0);
    for rotation in 1..4 {
        assert_eq!(Shape::of(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_handedness_turns_opposite_ways() {
    let board = Board::new();
    let mut right = Tetromino::spawn(PieceKind::T, Color::Red);
    let mut left = right;
    assert!(rotate(&mut right, &board, Handedness::Right));
    assert!(rotate(&mut left, &board, Handedness::Left));
    assert_eq!(right.rotation(), 1);
    assert_eq!(left.rotation(), 3);
}

// ============== Commit-or-revert ==============

#[test]
fn test_rejected_moves_leave_piece_untouched() {
    let mut board = Board::new();
    // a wall of blocks right of an upright I on the left edge
    for row in 0..ROWS as i8 {
        board.set(1, row, Some(Color::Purple));
    }
    let mut piece = Tetromino::at(PieceKind::I, 3, Color::Blue, Position::new(-2, 4));
    assert!(can_place(piece.shape(), piece.position(), &board));
    let before = piece;

    assert!(!move_horizontal(&mut piece, &board, Direction::Left));
    assert_eq!(piece, before);
    assert!(!move_horizontal(&mut piece, &board, Direction::Right));
    assert_eq!(piece, before);
    // turning flat would cross the wall
    assert!(!rotate(&mut piece, &board, Handedness::Right));
    assert_eq!(piece, before);
}

#[test]
fn test_random_walk_never_reaches_an_invalid_state() {
    let mut board = Board::new();
    for col in 0..COLS as i8 {
        if col % 3 != 0 {
            board.set(col, 0, Some(Color::Yellow));
            board.set(col, 3, Some(Color::Yellow));
        }
    }

    let mut state: u32 = 0x9e37_79b9;
    for kind in PieceKind::ALL {
        let mut piece = Tetromino::spawn(kind, Color::Green);
        for _ in 0..300 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let before = piece;
            let committed = match state % 4 {
                0 => move_horizontal(&mut piece, &board, Direction::Left),
                1 => move_horizontal(&mut piece, &board, Direction::Right),
                2 => rotate(&mut piece, &board, Handedness::Right),
                _ => !move_down(&mut piece, &board),
            };
            assert!(can_place(piece.shape(), piece.position(), &board));
            if !committed {
                assert_eq!(piece, before);
            }
        }
    }
}

// ============== End to end ==============

#[test]
fn test_i_piece_drops_to_floor_and_locks() {
    let mut board = Board::new();
    let mut score = Score::new(0);
    let mut piece = Tetromino::spawn(PieceKind::I, Color::LightBlue);

    let mut steps = 0;
    while !move_down(&mut piece, &board) {
        steps += 1;
    }
    // the flat bar sits on mask row 2
    assert_eq!(steps, ROWS - 3);
    lock_piece(&piece, &mut board);
    let cleared = board.clear_full_rows().len();
    score.record_clear(cleared);

    let floor: Vec<bool> = board
        .row(0)
        .map(|r| r.iter().map(|c| c.is_some()).collect())
        .unwrap_or_default();
    let expected: Vec<bool> = (0..COLS).map(|c| (3..7).contains(&c)).collect();
    assert_eq!(floor, expected);
    assert_eq!(board.filled(), 4);
    assert_eq!(score.points, 0);
    assert_eq!(score.level, 0);
}
