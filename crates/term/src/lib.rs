//! Terminal "game renderer" module.
//!
//! Renders game snapshots into a simple framebuffer of styled character
//! cells, then flushes the changed parts to the terminal. No widget toolkit.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: snapshot to framebuffer (pure)
//! - [`renderer`]: framebuffer to terminal via crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
