//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. There is no
//! repeat handling of its own: a held key repeats at the terminal's rate, one
//! command per delivered event.

pub mod map;

pub use block_drop_types as types;

pub use map::{map_key, map_key_event, should_quit};
