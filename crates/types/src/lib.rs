//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered on row 0
//!
//! # Gravity
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_DROP_MS` | 800 | Gravity interval of a fresh session |
//! | `DROP_STEP_PER_LINE_MS` | 20 | Interval reduction per cleared line |
//! | `DROP_INTERVAL_FLOOR_MS` | 150 | Fastest gravity interval |
//!
//! # Examples
//!
//! ```
//! use block_drop_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.index(), 6);
//! assert_eq!(PieceKind::from_index(6), Some(PieceKind::T));
//!
//! let action = GameAction::HardDrop;
//! assert_ne!(action, GameAction::SoftDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at the start of a session
pub const INITIAL_DROP_MS: u32 = 800;

/// How much faster gravity gets per cleared line
pub const DROP_STEP_PER_LINE_MS: u32 = 20;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u32 = 150;

/// Base of the line clear score; a batch of `n` rows is worth `n * n * LINE_CLEAR_BASE`
pub const LINE_CLEAR_BASE: u32 = 100;

/// The seven piece kinds
///
/// Declaration order fixes the colour index used by the grid snapshot:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7. Index 0 is an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in index order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Colour index of this kind (1..=7)
    pub fn index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::index`]; `0` and anything above 7 map to `None`
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Uppercase letter, as shown in the side panel
    pub fn letter(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Commands the input source can issue against a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell, locking it if it cannot fall
    SoftDrop,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start a new session
    Restart,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;
