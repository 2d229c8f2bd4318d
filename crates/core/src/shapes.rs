//! Shapes module - per-kind, per-rotation 5x5 masks
//!
//! Offsets are `(dx, dy)` inside the mask: `dx` grows to the right, `dy` grows
//! downward. Rotation 0 is the spawn orientation for every kind; there is no
//! separate spawn-only variant, so a spawned piece and one rotated back to 0
//! have the same mask. Rotation 1 is a quarter turn clockwise from 0.

use crate::types::{PieceKind, FIGURE_SIZE};

/// Offset of a single square inside the mask
pub type SquareOffset = (i8, i8);

/// Four square offsets
pub type ShapeOffsets = [SquareOffset; 4];

/// A FIGURE_SIZE x FIGURE_SIZE occupancy mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    mask: [[bool; FIGURE_SIZE]; FIGURE_SIZE],
}

impl Shape {
    /// Mask for `kind` at rotation index `rotation` (taken mod 4)
    pub fn of(kind: PieceKind, rotation: u8) -> Self {
        let mut mask = [[false; FIGURE_SIZE]; FIGURE_SIZE];
        for (dx, dy) in offsets(kind, rotation) {
            mask[dy as usize][dx as usize] = true;
        }
        Self { mask }
    }

    /// Occupied `(dx, dy)` cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = SquareOffset> + '_ {
        self.mask.iter().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .map(move |(dx, _)| (dx as i8, dy as i8))
        })
    }
}

/// Get the square offsets for a piece kind and rotation
pub fn offsets(kind: PieceKind, rotation: u8) -> ShapeOffsets {
    let rotation = rotation % 4;
    match kind {
        PieceKind::S => s_offsets(rotation),
        PieceKind::Z => z_offsets(rotation),
        PieceKind::J => j_offsets(rotation),
        PieceKind::L => l_offsets(rotation),
        PieceKind::T => t_offsets(rotation),
        PieceKind::O => o_offsets(rotation),
        PieceKind::I => i_offsets(rotation),
    }
}

/// S has two distinct orientations
fn s_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 | 2 => [(2, 0), (3, 0), (1, 1), (2, 1)],
        _ => [(2, 0), (2, 1), (3, 1), (3, 2)],
    }
}

/// Z has two distinct orientations
fn z_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 | 2 => [(1, 0), (2, 0), (2, 1), (3, 1)],
        _ => [(3, 0), (2, 1), (3, 1), (2, 2)],
    }
}

fn j_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 => [(2, 0), (2, 1), (1, 2), (2, 2)],
        1 => [(1, 0), (1, 1), (2, 1), (3, 1)],
        2 => [(2, 0), (3, 0), (2, 1), (2, 2)],
        _ => [(1, 1), (2, 1), (3, 1), (3, 2)],
    }
}

fn l_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 => [(2, 0), (2, 1), (2, 2), (3, 2)],
        1 => [(1, 1), (2, 1), (3, 1), (1, 2)],
        2 => [(1, 0), (2, 0), (2, 1), (2, 2)],
        _ => [(3, 0), (1, 1), (2, 1), (3, 1)],
    }
}

fn t_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 => [(2, 0), (1, 1), (2, 1), (3, 1)],
        1 => [(2, 0), (2, 1), (3, 1), (2, 2)],
        2 => [(1, 1), (2, 1), (3, 1), (2, 2)],
        _ => [(2, 0), (1, 1), (2, 1), (2, 2)],
    }
}

/// O looks the same in every rotation
fn o_offsets(_rotation: u8) -> ShapeOffsets {
    [(2, 0), (3, 0), (2, 1), (3, 1)]
}

/// I alternates between a bar on mask row 2 and a bar in mask column 2, so it
/// turns about the square at (2, 2). Rotation 0 is the flat bar.
fn i_offsets(rotation: u8) -> ShapeOffsets {
    match rotation {
        0 | 2 => [(0, 2), (1, 2), (2, 2), (3, 2)],
        _ => [(2, 0), (2, 1), (2, 2), (2, 3)],
    }
}
