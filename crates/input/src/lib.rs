//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to [`crate::types::Command`] tokens. Nothing
//! here touches game state; the driver queues whatever comes out.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
