//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. The game
//! snapshot is drawn into a framebuffer by [`GameView`], and the framebuffer is
//! flushed to the terminal by [`TerminalRenderer`].
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep drawing pure so it can be asserted on without a terminal
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_drop_core as core;
pub use block_drop_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
