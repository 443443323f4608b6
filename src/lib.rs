//! Block Drop (workspace facade crate).
//!
//! Re-exports the workspace crates as `block_drop::{core,input,term,types}` and
//! holds the pieces of the terminal binary that are worth testing on their own:
//! run configuration, logger setup and the player command policy.

pub mod config;
pub mod logging;

pub use block_drop_core as core;
pub use block_drop_input as input;
pub use block_drop_term as term;
pub use block_drop_types as types;

use crate::core::GameState;
use crate::types::GameAction;

/// Apply a command coming from the player.
///
/// Restart is only honoured once the game is over, so a stray key press
/// cannot throw away a running game. Returns whether the session changed.
pub fn apply_player_action(game: &mut GameState, action: GameAction) -> bool {
    if action == GameAction::Restart && !game.game_over() {
        return false;
    }
    game.apply_action(action)
}
