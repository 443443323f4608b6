//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the board simulation: grid, pieces, collision, line
//! clearing, scoring and gravity timing. It has **zero dependencies** on UI or
//! I/O, making it:
//!
//! - **Deterministic**: Same seed and same commands produce identical games
//! - **Testable**: Every rule is reachable through plain method calls
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with collision, merging and line clearing
//! - [`game_state`]: One session: active piece, score, gravity clock, game over
//! - [`pieces`]: Shape templates, matrix rotation and the horizontal kick search
//! - [`rng`]: Seeded uniform piece selection
//! - [`scoring`]: Batch line-clear score and gravity progression
//! - [`snapshot`]: Read-only session view for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn picks one of the seven kinds with equal odds
//! - **Rotation**: clockwise only; tries the current column, then one left, then one right
//! - **No lock delay**: a piece locks as soon as a drop is blocked
//! - **Scoring**: `n` rows cleared together score `n² × 100`
//! - **Gravity**: 800ms per row, 20ms faster per cleared line, never below 150ms
//! - **Game over**: a freshly spawned piece collides
//!
//! # Example
//!
//! ```
//! use block_drop_core::GameState;
//! use block_drop_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(!game.game_over());
//! assert_eq!(game.piece_id(), 2);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! milliseconds elapsed since the previous frame. Frames need not be regular.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use block_drop_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{template, try_rotate, Matrix, Tetromino};
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::{drop_interval_ms, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
