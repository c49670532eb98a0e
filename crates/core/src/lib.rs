//! Core simulation module - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules: shape geometry, collision,
//! rotation, line clears and hold bookkeeping. It has **no dependencies** on
//! terminals, clocks or input devices:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Caller-driven**: gravity is a `tick()` call, never a timer
//! - **Owned state**: every round is a plain value; no globals
//!
//! # Module Structure
//!
//! - [`catalog`]: rotation states of the seven piece kinds as 5x5 grids
//! - [`piece`]: positioned piece, bounding box, clamp, collision, drop target
//! - [`board`]: locked cells keyed by coordinate, line clear and shift
//! - [`game_state`]: the engine; ticks, intents, locking, hold, game over
//! - [`rng`]: seeded uniform / 7-bag piece randomizer
//! - [`snapshot`]: owned copies of state for rendering
//! - [`config`]: board size, spawn point and gravity period
//!
//! # Rules
//!
//! - **Clamp, don't reject**: horizontal overreach snaps to the wall
//! - **No kicks**: a rotation that collides is simply refused
//! - **Hold**: once per piece; the held piece returns at the spawn point
//! - **Game over**: a new piece collides at spawn, or a locked cell reaches the
//!   spawn row
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, Outcome};
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! let outcome = game.apply_action(GameAction::HardDrop);
//!
//! assert!(matches!(outcome, Outcome::Locked(_)));
//! assert_eq!(game.board().len(), 4);
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowSet};
pub use catalog::{preview_grid, rotation_states, variation_count, ShapeGrid};
pub use config::{ConfigError, EngineConfig};
pub use game_state::{GameState, LockEvent, Outcome, Phase};
pub use piece::{BoundingBox, Piece};
pub use rng::{PieceQueue, Randomizer, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
