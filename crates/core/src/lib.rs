//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, timers, or I/O, making it:
//!
//! - **Deterministic**: Same seed (or piece sequence) produces identical games
//! - **Testable**: Time only moves when the caller ticks it
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked cells, row removal and compaction
//! - [`pieces`]: shape matrices, canonical shapes and the active piece
//! - [`collision`]: the single placement check used by every mutation
//! - [`rotation`]: clockwise rotation with a four-step kick sequence
//! - [`placement`]: locking pieces and staged line clears
//! - [`progression`]: score, level and gravity speed
//! - [`rng`]: injectable piece sources (uniform with replacement, fixed sequence)
//! - [`game_state`]: the session state machine and command dispatch
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Selection**: Each new piece is drawn uniformly among the seven kinds; repeats allowed
//! - **Rotation**: Clockwise matrix rotation, kicks tried in place, left, right, up
//! - **Gravity**: 800ms per row at level 1, 5% faster on every level-up
//! - **Scoring**: 100 points per cleared row, one level per 500 points
//! - **Clears**: Full rows are marked, then removed 500ms later
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::{Command, Phase};
//!
//! let mut game = GameState::new(12345);
//! game.dispatch(Command::Start);
//!
//! game.dispatch(Command::MoveRight);
//! game.dispatch(Command::Rotate);
//! game.tick(800); // one gravity step
//!
//! assert_eq!(game.phase(), Phase::Running);
//! assert_eq!(game.active().unwrap().y, 1);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod placement;
pub mod progression;
pub mod rng;
pub mod rotation;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowSet};
pub use collision::{collides, is_valid_move};
pub use game_state::GameState;
pub use pieces::{get_shape, Piece, Shape};
pub use placement::{detect_full_rows, place, PendingClear};
pub use progression::{on_lines_cleared, Progression};
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use rotation::{rotate_piece, try_rotate};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
