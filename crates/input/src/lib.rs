//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] intents and
//! recognizes the runner-level keys (pause, restart, quit) that never reach
//! the engine.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_pause, is_restart, should_quit};
