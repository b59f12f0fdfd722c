//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`] values and
//! collects them per frame, together with the soft drop held-state. The
//! simulation never sees key events, only commands and a boolean.

pub mod frame;
pub mod map;

pub use tower_tetris_types as types;

pub use frame::{InputFrame, SoftDropLatch, MAX_COMMANDS_PER_FRAME};
pub use map::{handle_key_event, is_soft_drop_key, should_quit};
