//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the falling-block simulation: board, piece catalog,
//! collision, merge, line clearing, scoring and the gravity tick. It has
//! **zero dependencies** on UI, terminal or I/O, which makes it:
//!
//! - **Deterministic**: the same seed produces the same piece sequence
//! - **Testable**: every rule can be exercised on a hand-built board
//! - **Portable**: any front end can drive it through commands and a clock
//!
//! # Module Structure
//!
//! - [`board`]: `cols x rows` grid with collision queries and line clearing
//! - [`game_state`]: the engine, with active/next pieces, commands and tick
//! - [`pieces`]: tetromino matrices, colors and clockwise rotation
//! - [`rng`]: uniform piece selection with replacement
//! - [`scoring`]: line-clear points, level and gravity interval
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - **Random pieces**: each piece is drawn independently; repeats are possible
//! - **Strict rotation**: clockwise only, no wall kicks; blocked turns are ignored
//! - **Locking**: a piece locks as soon as it cannot move down
//! - **Scoring**: `lines * 100 * level` per lock; level is `score / 1000 + 1`
//! - **Gravity**: `max(100, 1000 - (level - 1) * 100)` ms per row
//! - **Game over**: a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(!game.board().is_empty());
//! assert_eq!(game.piece_id(), 2);
//! ```
//!
//! # Timing
//!
//! The engine never reads a clock. Call [`GameState::tick`] with a millisecond
//! timestamp as often as convenient; it drops the active piece by one row once
//! more than the current drop interval has elapsed since the last drop.

pub mod board;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardDims};
pub use error::ConfigError;
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_color, get_shape, Shape};
pub use rng::{FixedSequence, PieceSource, RandomPicker, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::GameSnapshot;
