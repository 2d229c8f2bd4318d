//! Board tests - collision, line clearing and game-over detection

use tasktris::core::{can_place, is_game_over, Board, Position, Shape, Tetromino};
use tasktris::types::{Color, PieceKind, COLS, ROWS};

fn fill_row(board: &mut Board, row: usize) {
    for col in 0..COLS as i8 {
        board.set(col, row as i8, Some(Color::Green));
    }
}

/// Deterministic pseudo-random board that never has a full row
fn scattered_board(seed: u32) -> Board {
    let mut board = Board::new();
    let mut state = seed.wrapping_mul(2654435761).max(1);
    for row in 0..ROWS as i8 {
        for col in 0..COLS as i8 - 1 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state % 3 == 0 {
                board.set(col, row, Some(Color::Red));
            }
        }
    }
    board
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), COLS);
    assert_eq!(board.height(), ROWS);
    for row in 0..ROWS as i8 {
        for col in 0..COLS as i8 {
            assert_eq!(board.get(col, row), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(COLS as i8, 0), None);
    assert_eq!(board.get(0, ROWS as i8), None);
}

#[test]
fn test_collision_soundness_matches_brute_force() {
    // A shape fits iff every square is inside [0, COLS) x above the floor and on an
    // empty cell; squares above the top never collide.
    for seed in 0..8 {
        let board = scattered_board(seed);
        for kind in PieceKind::ALL {
            for rotation in 0..4 {
                let shape = Shape::of(kind, rotation);
                for y in -3..ROWS as i8 + 2 {
                    for x in -3..COLS as i8 + 2 {
                        let expected = shape.cells().all(|(dx, dy)| {
                            let col = x + dx;
                            let depth = y + dy;
                            (0..COLS as i8).contains(&col)
                                && depth < ROWS as i8
                                && !board.is_occupied(col, Board::row_at_depth(depth))
                        });
                        assert_eq!(
                            can_place(&shape, Position::new(x, y), &board),
                            expected,
                            "{kind:?} r{rotation} at ({x}, {y}) seed {seed}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_clear_without_full_rows_changes_nothing() {
    let mut board = scattered_board(3);
    let before = board.clone();
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_clear_rows_two_and_five() {
    let mut board = Board::new();
    fill_row(&mut board, 2);
    fill_row(&mut board, 5);
    // markers: one per remaining row, column = row % COLS
    for row in 0..ROWS {
        if row != 2 && row != 5 {
            board.set((row % COLS) as i8, row as i8, Some(Color::Blue));
        }
    }

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[2, 5]);

    let mut expected = Board::new();
    for row in 0..ROWS {
        let shift = match row {
            0 | 1 => 0,
            3 | 4 => 1,
            r if r > 5 => 2,
            _ => continue,
        };
        expected.set((row % COLS) as i8, (row - shift) as i8, Some(Color::Blue));
    }
    assert_eq!(board, expected);
    assert_eq!(board.row(ROWS - 1).map(|r| r.iter().all(|c| c.is_none())), Some(true));
}

#[test]
fn test_spawn_on_filled_top_is_game_over() {
    let mut board = Board::new();
    // fill the top three rows under every spawn column
    for depth in 0..3 {
        for col in 2..7 {
            board.set(col, Board::row_at_depth(depth), Some(Color::Purple));
        }
    }
    for kind in PieceKind::ALL {
        let piece = Tetromino::spawn(kind, Color::Blue);
        assert!(is_game_over(&piece, &board), "{kind:?}");
    }
}

#[test]
fn test_fresh_spawn_is_not_game_over() {
    let board = Board::new();
    for kind in PieceKind::ALL {
        assert!(!is_game_over(&Tetromino::spawn(kind, Color::Red), &board));
    }
}
