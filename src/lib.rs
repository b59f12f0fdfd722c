//! Tower Tetris (workspace facade crate).
//!
//! Re-exports the member crates under one roof so the binary, the
//! integration tests and the benches can use `tower_tetris::{core, input,
//! term, types}`.

pub mod config;

pub use tower_tetris_core as core;
pub use tower_tetris_input as input;
pub use tower_tetris_term as term;
pub use tower_tetris_types as types;

pub use config::GameConfig;
