//! Board module - manages the game grid
//!
//! The board is a 10x16 grid where each cell can be empty or hold a square color.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (col, row) where col ranges 0..9 (left to right) and row ranges
//! 0..15 counted upward from the floor. Pieces describe their vertical position as
//! a depth below the top row instead; [`Board::row_at_depth`] is the only place the
//! two are converted.

use arrayvec::ArrayVec;

use crate::types::{Cell, COLS, ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = COLS * ROWS;

/// The game board - 10 columns x 16 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order with the floor first (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (col, row) coordinates
    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= COLS as i8 || row < 0 || row >= ROWS as i8 {
            return None;
        }
        Some((row as usize) * COLS + (col as usize))
    }

    /// Convert a piece-space depth (0 = top row) into a board row (0 = floor).
    ///
    /// Depths below the floor give negative rows, depths above the top give rows
    /// `>= ROWS`; both are out of range for [`Board::get`].
    #[inline(always)]
    pub fn row_at_depth(depth: i8) -> i8 {
        ROWS as i8 - 1 - depth
    }

    pub fn width(&self) -> usize {
        COLS
    }

    pub fn height(&self) -> usize {
        ROWS
    }

    /// Get cell at position (col, row)
    /// Returns None if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at position (col, row)
    /// Returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= ROWS {
            return false;
        }
        let start = row * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// One row, left to right
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= ROWS {
            return None;
        }
        let start = row * COLS;
        Some(&self.cells[start..start + COLS])
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    ///
    /// Every remaining row drops by the number of cleared rows beneath it.
    /// Uses a two-pointer pass with zero-allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_row = 0usize;

        for read_row in 0..ROWS {
            if self.is_row_full(read_row) {
                cleared_rows.push(read_row);
                continue;
            }
            if write_row != read_row {
                let src = read_row * COLS;
                self.cells.copy_within(src..src + COLS, write_row * COLS);
            }
            write_row += 1;
        }

        for cell in &mut self.cells[write_row * COLS..] {
            *cell = None;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn fill_row(board: &mut Board, row: i8) {
        for col in 0..COLS as i8 {
            board.set(col, row, Some(Color::Red));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 15), Some(159));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 16), None);
    }

    #[test]
    fn depth_zero_is_the_top_row() {
        assert_eq!(Board::row_at_depth(0), 15);
        assert_eq!(Board::row_at_depth(15), 0);
        assert_eq!(Board::row_at_depth(16), -1);
        assert_eq!(Board::row_at_depth(-1), 16);
    }

    #[test]
    fn clear_full_rows_compacts_from_the_floor() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        board.set(4, 1, Some(Color::Blue));
        fill_row(&mut board, 2);
        board.set(7, 3, Some(Color::Green));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[0, 2]);
        assert_eq!(board.get(4, 0), Some(Some(Color::Blue)));
        assert_eq!(board.get(7, 1), Some(Some(Color::Green)));
        assert_eq!(board.filled(), 2);
    }

    #[test]
    fn clearing_every_row_leaves_an_empty_board() {
        let mut board = Board::new();
        for row in 0..ROWS as i8 {
            fill_row(&mut board, row);
        }
        assert_eq!(board.clear_full_rows().len(), ROWS);
        assert_eq!(board, Board::new());
    }
}
