//! Placement and staged line clears
//!
//! Locking a piece merges it into the board. Full rows are not removed right
//! away: they are marked first and removed once the clear delay has elapsed,
//! so a renderer can animate them. The pending window is plain state that the
//! game loop counts down, which makes cancelling it on reset a matter of
//! dropping the value.

use crate::board::{Board, RowSet};
use crate::pieces::Piece;

/// Merge `piece` into `board` unconditionally.
///
/// Callers must already know the piece cannot move down any further.
pub fn place(board: &Board, piece: &Piece) -> Board {
    board.merge(piece)
}

/// Row indices of every full row, top to bottom
pub fn detect_full_rows(board: &Board) -> RowSet {
    board.full_rows()
}

/// Rows marked as full and waiting for structural removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClear {
    rows: RowSet,
    remaining_ms: u32,
}

impl PendingClear {
    pub fn new(rows: RowSet, delay_ms: u32) -> Self {
        Self {
            rows,
            remaining_ms: delay_ms,
        }
    }

    /// Marked rows, top to bottom
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Time left before the rows are removed
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Count the delay down; returns true once it has fully elapsed
    pub fn advance(&mut self, elapsed_ms: u32) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        self.is_due()
    }

    pub fn is_due(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Remove the marked rows from `board`; returns the cleared count
    pub fn commit(self, board: &mut Board) -> usize {
        board.remove_rows(&self.rows)
    }
}

/// Lock `piece` into `board` and mark any rows it completed.
///
/// Returns `None` when nothing was completed. With `delay_ms == 0` the
/// returned clear is already due.
pub fn lock_piece(board: &mut Board, piece: &Piece, delay_ms: u32) -> Option<PendingClear> {
    *board = place(board, piece);
    let rows = detect_full_rows(board);
    if rows.is_empty() {
        None
    } else {
        Some(PendingClear::new(rows, delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;
    use crate::types::{Color, PieceKind};

    fn fill_row_except(board: &mut Board, y: i16, gaps: &[i16]) {
        for x in 0..10 {
            if !gaps.contains(&x) {
                board.set(x, y, Some(Color::Blue));
            }
        }
    }

    #[test]
    fn test_place_without_full_rows() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O);
        piece.y = 18;

        assert!(lock_piece(&mut board, &piece, 500).is_none());
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_place_marks_rows_without_removing() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[4, 5]);
        fill_row_except(&mut board, 18, &[4, 5]);
        let mut piece = Piece::spawn(PieceKind::O);
        piece.y = 18;

        let pending = lock_piece(&mut board, &piece, 500).unwrap();
        assert_eq!(pending.rows(), &[18, 19]);
        assert_eq!(pending.remaining_ms(), 500);
        // Still on the board until committed.
        assert!(board.is_row_full(18));
        assert!(board.is_row_full(19));
    }

    #[test]
    fn test_pending_clear_counts_down_then_commits() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[]);
        board.set(0, 18, Some(Color::Red));

        let mut pending = PendingClear::new(detect_full_rows(&board), 500);
        assert!(!pending.advance(499));
        assert!(pending.advance(1));

        assert_eq!(pending.commit(&mut board), 1);
        assert_eq!(board.get(0, 19), Some(Some(Color::Red)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn test_zero_delay_is_due_immediately() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, &[0, 1, 2, 3]);
        let mut piece = Piece::spawn(PieceKind::I);
        piece.x = 0;
        piece.y = 19;

        let pending = lock_piece(&mut board, &piece, 0).unwrap();
        assert!(pending.is_due());
        assert_eq!(pending.commit(&mut board), 1);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_detect_ignores_rows_with_a_gap() {
        let mut board = Board::new();
        fill_row_except(&mut board, 10, &[9]);
        fill_row_except(&mut board, 11, &[]);
        assert_eq!(detect_full_rows(&board).as_slice(), &[11]);
    }
}
