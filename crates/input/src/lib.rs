//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Holds no
//! state: key repeat comes from the terminal, and each press is one action.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, is_press, should_quit};
