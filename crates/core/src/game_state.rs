//! Game state module - session state machine and command dispatch
//!
//! This module ties together the board, the active piece, the piece source,
//! staged line clears and progression. It is driven from outside by two
//! inputs: discrete [`Command`]s through [`GameState::dispatch`] and elapsed
//! time through [`GameState::tick`]. Both run to completion; nothing here
//! blocks or spawns timers. The gravity timer and the pending clear are plain
//! fields, so `reset` cancels them by overwriting them.

use crate::board::Board;
use crate::collision::{collides, is_valid_move};
use crate::pieces::Piece;
use crate::placement::{lock_piece, PendingClear};
use crate::progression::Progression;
use crate::rng::{PieceSource, UniformSource};
use crate::rotation::rotate_piece;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformSource> {
    board: Board,
    active: Option<Piece>,
    source: S,
    progression: Progression,
    phase: Phase,
    /// Time accumulated towards the next gravity step.
    drop_timer_ms: f64,
    /// Rows marked full, waiting for the clear delay to run out.
    pending_clear: Option<PendingClear>,
    line_clear_delay_ms: u32,
    /// Events since the last `take_events` (consumed by observers).
    events: Vec<CoreEvent>,
}

impl GameState<UniformSource> {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_source(UniformSource::new(seed))
    }
}

impl Default for GameState<UniformSource> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a new game drawing pieces from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            board: Board::new(),
            active: None,
            source,
            progression: Progression::new(),
            phase: Phase::NotStarted,
            drop_timer_ms: 0.0,
            pending_clear: None,
            line_clear_delay_ms: LINE_CLEAR_DELAY_MS,
            events: Vec::new(),
        }
    }

    /// Override the staged clear delay (0 removes rows immediately)
    pub fn with_line_clear_delay_ms(mut self, delay_ms: u32) -> Self {
        self.line_clear_delay_ms = delay_ms;
        self
    }

    /// Start from a prepared board instead of an empty one
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn started(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.progression.score()
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.progression.drop_interval_ms()
    }

    pub fn line_clear_delay_ms(&self) -> u32 {
        self.line_clear_delay_ms
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rows currently marked for the staged clear (empty when none)
    pub fn rows_pending_clear(&self) -> &[usize] {
        match &self.pending_clear {
            Some(pending) => pending.rows(),
            None => &[],
        }
    }

    /// Time left in the staged clear window, if one is open
    pub fn pending_clear_remaining_ms(&self) -> Option<u32> {
        self.pending_clear.as_ref().map(|p| p.remaining_ms())
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the recorded events.
    ///
    /// Events accumulate until taken, so long-running callers must drain
    /// them regularly.
    pub fn take_events(&mut self) -> Vec<CoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.rows_pending_clear.clear();
        out.rows_pending_clear
            .extend(self.rows_pending_clear().iter().copied());
        out.phase = self.phase;
        out.started = self.started();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.score = self.score();
        out.level = self.level();
        out.drop_interval_ms = self.drop_interval_ms();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a command.
    ///
    /// Returns true if the command changed anything. Commands that do not
    /// apply in the current phase, or moves that would collide, are ignored.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            _ if command.is_movement() && !self.accepts_movement() => false,
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.soft_drop(),
            Command::Rotate => self.try_rotate(),
        }
    }

    fn accepts_movement(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Leave `NotStarted` and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Running;
        self.drop_timer_ms = 0.0;
        self.events.push(CoreEvent::Started);
        if self.active.is_none() && self.pending_clear.is_none() {
            self.spawn_piece();
        }
        true
    }

    /// Flip between `Running` and `Paused`; ignored in any other phase
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.events.push(CoreEvent::Paused);
                true
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.drop_timer_ms = 0.0;
                self.events.push(CoreEvent::Resumed);
                if self.active.is_none() && self.pending_clear.is_none() {
                    self.spawn_piece();
                }
                true
            }
            Phase::NotStarted | Phase::GameOver => false,
        }
    }

    /// Return to a fresh `NotStarted` session.
    ///
    /// Drops the active piece, the gravity timer and any pending clear. The
    /// piece source keeps its position in the random stream.
    pub fn reset(&mut self) -> bool {
        self.board.clear();
        self.active = None;
        self.progression = Progression::new();
        self.phase = Phase::NotStarted;
        self.drop_timer_ms = 0.0;
        self.pending_clear = None;
        self.events.push(CoreEvent::Reset);
        true
    }

    /// Spawn a new piece from the source.
    ///
    /// If it collides at the spawn position the game ends and the piece is
    /// discarded.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_kind();
        let piece = Piece::spawn(kind);

        if collides(&self.board, piece.x, piece.y, &piece.shape) {
            self.active = None;
            self.phase = Phase::GameOver;
            self.events.push(CoreEvent::GameOver {
                score: self.score(),
            });
            return false;
        }

        self.active = Some(piece);
        self.events.push(CoreEvent::Spawned { kind });
        true
    }

    /// Check if the active piece can move by (dx, dy)
    pub fn can_move(&self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        is_valid_move(
            &self.board,
            active.x.saturating_add(dx),
            active.y.saturating_add(dy),
            &active.shape,
        )
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        if !self.can_move(dx, dy) {
            return false;
        }
        self.active = Some(active.moved(dx, dy));
        true
    }

    /// Try to rotate the active piece with the simple kick sequence
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match rotate_piece(&self.board, &active) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move down one row, or lock the piece if it is resting on something.
    ///
    /// Gravity and the player's soft drop both go through here.
    pub(crate) fn soft_drop(&mut self) -> bool {
        if self.active.is_none() {
            return false;
        }
        if self.try_move(0, 1) {
            return true;
        }
        self.lock_active();
        true
    }

    /// Merge the active piece into the board and start a staged clear if it
    /// completed any rows. Spawns the next piece when there is nothing to clear.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        self.events.push(CoreEvent::Locked {
            kind: piece.kind,
            x: piece.x,
            y: piece.y,
        });

        match lock_piece(&mut self.board, &piece, self.line_clear_delay_ms) {
            None => {
                self.spawn_piece();
            }
            Some(pending) => {
                self.events.push(CoreEvent::RowsMarked {
                    count: pending.rows().len() as u32,
                });
                let due = pending.is_due();
                self.pending_clear = Some(pending);
                if due {
                    self.finish_clear();
                }
            }
        }
    }

    /// Remove the marked rows, score them and bring in the next piece.
    fn finish_clear(&mut self) {
        let Some(pending) = self.pending_clear.take() else {
            return;
        };
        let cleared = pending.commit(&mut self.board);
        let update = self.progression.apply_lines(cleared);
        self.events.push(CoreEvent::RowsCleared {
            count: cleared as u32,
            points: update.points,
            score: self.score(),
        });
        if update.leveled_up {
            // New interval: restart the gravity timer.
            self.drop_timer_ms = 0.0;
            self.events.push(CoreEvent::LevelUp {
                level: self.level(),
                drop_interval_ms: self.drop_interval_ms(),
            });
        }

        if self.phase == Phase::Running && self.active.is_none() {
            self.spawn_piece();
        }
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Counts down a pending clear (also while paused), spawns a piece when
    /// none is active, and applies one gravity step for every whole drop
    /// interval that has elapsed. Gravity stops early when the piece locks.
    /// Returns true if anything changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if matches!(self.phase, Phase::NotStarted | Phase::GameOver) {
            return false;
        }

        let mut changed = false;

        if let Some(pending) = self.pending_clear.as_mut() {
            if pending.advance(elapsed_ms) {
                self.finish_clear();
                changed = true;
            }
        }

        if self.phase != Phase::Running || self.pending_clear.is_some() {
            return changed;
        }

        if self.active.is_none() {
            return self.spawn_piece() || changed;
        }

        // One gravity step per whole interval; the remainder carries over.
        self.drop_timer_ms += elapsed_ms as f64;
        while self.drop_timer_ms >= self.drop_interval_ms() {
            self.drop_timer_ms -= self.drop_interval_ms();
            changed = true;
            if !self.try_move(0, 1) {
                // The next piece starts with a fresh interval.
                self.drop_timer_ms = 0.0;
                self.lock_active();
                break;
            }
        }

        changed
    }
}
