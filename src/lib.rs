//! Blockfall (workspace facade crate).
//!
//! Re-exports the game crates under `blockfall::{core,engine,input,term,types}`
//! and adds the pieces the binary needs on top of them: environment
//! configuration, the JSON-lines event log and headless script replay.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod event_log;
pub mod replay;

pub use config::Config;
pub use event_log::{EventLog, EventRecord};
pub use replay::{replay, ReplayReport};
