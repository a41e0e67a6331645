use crate::board::{RowSet, BOARD_ROWS};
use crate::pieces::{Piece, Shape};
use crate::types::{Cell, Color, PieceKind, Phase, BOARD_WIDTH, INITIAL_DROP_MS, START_LEVEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
            color: value.color,
        }
    }
}

impl ActiveSnapshot {
    pub fn occupies(&self, x: i16, y: i16) -> bool {
        let col = x - self.x as i16;
        let row = y - self.y as i16;
        col >= 0 && row >= 0 && self.shape.is_filled(col as usize, row as usize)
    }
}

/// Read-only view handed to renderers.
///
/// The board and the active piece are kept apart; use [`GameSnapshot::cell_at`]
/// to get the composed display cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_ROWS],
    pub active: Option<ActiveSnapshot>,
    pub rows_pending_clear: RowSet,
    pub phase: Phase,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub drop_interval_ms: f64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_ROWS];
        self.active = None;
        self.rows_pending_clear.clear();
        self.phase = Phase::NotStarted;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.level = START_LEVEL;
        self.drop_interval_ms = INITIAL_DROP_MS;
    }

    /// Display cell at (x, y): the active piece's color where it covers the
    /// cell, otherwise the locked board cell.
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(active) = self.active {
            if active.occupies(x as i16, y as i16) {
                return Some(active.color);
            }
        }
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .flatten()
    }

    /// Whether row `y` is marked for the staged clear
    pub fn is_row_clearing(&self, y: usize) -> bool {
        self.rows_pending_clear.contains(&y)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_ROWS],
            active: None,
            rows_pending_clear: RowSet::new(),
            phase: Phase::NotStarted,
            started: false,
            paused: false,
            game_over: false,
            score: 0,
            level: START_LEVEL,
            drop_interval_ms: INITIAL_DROP_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_prefers_active_piece() {
        let mut snap = GameSnapshot::default();
        snap.board[1][5] = Some(Color::Blue);
        snap.board[19][0] = Some(Color::Green);
        snap.active = Some(Piece::spawn(PieceKind::T).into());

        // T at (4,0) covers (5,0), (4,1), (5,1), (6,1).
        assert_eq!(snap.cell_at(5, 1), Some(Color::Purple));
        assert_eq!(snap.cell_at(4, 0), None);
        assert_eq!(snap.cell_at(0, 19), Some(Color::Green));
        assert_eq!(snap.cell_at(42, 0), None);
    }

    #[test]
    fn test_default_matches_fresh_game_progression() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.level, START_LEVEL);
        assert_eq!(snap.level, 1);
        assert_eq!(snap.drop_interval_ms, INITIAL_DROP_MS);
        assert_eq!(snap.drop_interval_ms, 800.0);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut snap = GameSnapshot::default();
        snap.score = 300;
        snap.level = 4;
        snap.drop_interval_ms = 685.9;
        snap.rows_pending_clear.push(19);
        snap.game_over = true;
        snap.clear();
        assert_eq!(snap, GameSnapshot::default());
    }
}
