//! Game loop driver for the blockfall core.
//!
//! [`GameLoop`] serializes player commands and clock ticks through one queue,
//! [`FrameClock`] turns wall-clock deltas into fixed 16ms steps, and
//! [`script`] reads plain-text input scripts for headless replays.
//!
//! ```
//! use blockfall_engine::{GameLoop, LoopInput};
//! use blockfall_types::Command;
//!
//! let mut game = GameLoop::new(7);
//! game.run_inputs([LoopInput::Command(Command::Start), LoopInput::Tick(800)]);
//! assert_eq!(game.state().active().unwrap().y, 1);
//! ```

pub mod clock;
pub mod game_loop;
pub mod script;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use clock::FrameClock;
pub use game_loop::{GameLoop, LoopInput, RunReport};
pub use script::{parse_line, parse_script};
