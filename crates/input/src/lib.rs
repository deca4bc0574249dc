//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The engine
//! knows nothing about keys; the runner feeds it whatever this module returns.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
