//! Collision checks for candidate piece placements
//!
//! Every mutation path (movement, rotation, gravity, spawn) asks these
//! functions before touching the active piece.

use crate::board::Board;
use crate::pieces::Shape;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// True if `shape` placed with its origin at (x, y) leaves the board on the
/// left, right or bottom, or overlaps a locked cell.
///
/// Cells above row 0 are allowed: pieces may sit partially above the
/// visible board.
pub fn collides(board: &Board, x: i8, y: i8, shape: &Shape) -> bool {
    shape.minos().any(|(col, row)| {
        let ax = x as i16 + col as i16;
        let ay = y as i16 + row as i16;
        if ax < 0 || ax >= BOARD_WIDTH as i16 || ay >= BOARD_HEIGHT as i16 {
            return true;
        }
        ay >= 0 && board.is_occupied(ax, ay)
    })
}

/// Negation of [`collides`]
#[inline]
pub fn is_valid_move(board: &Board, x: i8, y: i8, shape: &Shape) -> bool {
    !collides(board, x, y, shape)
}
