//! Rotation with a simple kick sequence
//!
//! The rotated shape is tried at four positions relative to the current
//! origin, in order: in place, one column left, one column right, one row up.
//! The first one that fits wins. There are no diagonal or downward kicks and
//! no special pivot for I or O.

use crate::board::Board;
use crate::collision::is_valid_move;
use crate::pieces::{Piece, Shape};

/// Kick candidates as (dx, dy), tried in order
pub const KICK_OFFSETS: [(i8, i8); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// Try to rotate `shape` clockwise at (x, y).
///
/// Returns the rotated shape and the accepted kick offset, or `None` when
/// every candidate is blocked.
pub fn try_rotate(
    shape: &Shape,
    x: i8,
    y: i8,
    is_valid: impl Fn(i8, i8, &Shape) -> bool,
) -> Option<(Shape, (i8, i8))> {
    let rotated = shape.rotated_cw();
    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&(dx, dy)| is_valid(x.saturating_add(dx), y.saturating_add(dy), &rotated))
        .map(|kick| (rotated, kick))
}

/// Rotate the active piece against `board`; `None` leaves the piece as is
pub fn rotate_piece(board: &Board, piece: &Piece) -> Option<Piece> {
    let (shape, (dx, dy)) = try_rotate(&piece.shape, piece.x, piece.y, |x, y, s| {
        is_valid_move(board, x, y, s)
    })?;
    Some(Piece {
        shape,
        ..piece.moved(dx, dy)
    })
}
