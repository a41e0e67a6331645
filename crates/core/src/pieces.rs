//! Pieces module - shape matrices and the active piece
//!
//! A [`Shape`] is a small row-major occupancy matrix (at most 4x4). Each
//! [`PieceKind`] has one canonical shape; other orientations are produced by
//! rotating the matrix, so there are no per-rotation lookup tables.

use crate::types::{Color, PieceKind, SPAWN_X, SPAWN_Y};

/// Largest side of any shape matrix
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the shape origin: (col, row)
pub type MinoOffset = (i8, i8);

/// Row-major occupancy matrix of a piece at one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values.
    ///
    /// Rows may be ragged (missing cells are empty). Anything beyond 4x4 is
    /// ignored.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let height = rows.len().min(MAX_SHAPE_SIZE);
        let mut width = 0;
        for (r, row) in rows.iter().take(MAX_SHAPE_SIZE).enumerate() {
            let row_w = row.len().min(MAX_SHAPE_SIZE);
            width = width.max(row_w);
            for (c, &v) in row.iter().take(MAX_SHAPE_SIZE).enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self {
            width: width as u8,
            height: height as u8,
            cells,
        }
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether local cell (col, row) is occupied. Out of range is empty.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.cells[row][col]
    }

    /// Occupied cells as (col, row) offsets, row-major order
    pub fn minos(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        (0..self.height as usize).flat_map(move |row| {
            (0..self.width as usize)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    pub fn mino_count(&self) -> usize {
        self.minos().count()
    }

    /// Rotate 90° clockwise: transpose, then reverse each new row.
    ///
    /// `new[i][j] = old[h - 1 - j][i]`; width and height swap.
    pub fn rotated_cw(&self) -> Self {
        let old_w = self.width as usize;
        let old_h = self.height as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, new_row) in cells.iter_mut().enumerate().take(old_w) {
            for (j, cell) in new_row.iter_mut().enumerate().take(old_h) {
                *cell = self.cells[old_h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

/// Canonical (spawn) shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
        PieceKind::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
        PieceKind::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        PieceKind::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
        PieceKind::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
        PieceKind::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
        PieceKind::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
    }
}

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl Piece {
    /// Create a new piece in its canonical shape at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
            color: kind.color(),
        }
    }

    /// Same piece translated by (dx, dy)
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.shape
            .minos()
            .map(move |(c, r)| (self.x as i16 + c as i16, self.y as i16 + r as i16))
    }

    /// Whether the piece covers board cell (x, y)
    pub fn occupies(&self, x: i16, y: i16) -> bool {
        let col = x - self.x as i16;
        let row = y - self.y as i16;
        col >= 0 && row >= 0 && self.shape.is_filled(col as usize, row as usize)
    }
}
