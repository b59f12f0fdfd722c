//! Core game logic - pure, deterministic, and testable
//!
//! All rules of the falling-block puzzle live here. There is no I/O, no
//! clock and no global state: the only source of variation is the injected
//! [`RandomSource`], so the same seed and the same per-frame inputs always
//! produce the same match.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, placement validity, locking and row clearing
//! - [`pieces`]: literal shape catalog, `Tetromino` and the horizontal kick search
//! - [`rng`]: `RandomSource` seam, the default LCG and the 7-bag randomizer
//! - [`scoring`]: classic line scores, level from lines, gravity interval
//! - [`simulation`]: active piece lifecycle (spawn, move, rotate, lock, game over)
//! - [`session`]: per-frame driver with the gravity counter and restart handling
//! - [`snapshot`]: copied-out view for renderers
//!
//! # Rules
//!
//! - **7-Bag**: every aligned group of seven spawns is a permutation of the kinds
//! - **Rotation**: try the rotated shape in place, then shifted -1, +1, -2, +2 columns
//! - **Gravity**: one row every `max(2, 30 - 2 * level)` frames; soft drop every frame
//! - **Locking**: a piece that cannot fall locks immediately (no lock delay)
//! - **Scoring**: 0/40/100/300/1200 × (level + 1); level = lines / 10
//! - **Game over**: blocked spawn, or a lock with any cell above the board
//!
//! # Example
//!
//! ```
//! use tower_tetris_core::Session;
//! use tower_tetris_types::Command;
//!
//! let mut session = Session::new(12345);
//! session.step(&[Command::MoveRight, Command::RotateCw], false);
//! session.step(&[Command::HardDrop], false);
//!
//! let snap = session.snapshot();
//! assert_eq!(snap.piece_id, 2);
//! assert!(!snap.game_over);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod simulation;
pub mod snapshot;

pub use tower_tetris_types as types;

pub use board::{Board, Placement};
pub use pieces::{get_shape, try_rotate, validate_table, CatalogError, PieceCatalog, Tetromino};
pub use rng::{RandomSource, SevenBag, SimpleRng};
pub use scoring::{calculate_line_score, gravity_frames, Scoring};
pub use session::{GravityStep, Session};
pub use simulation::{LockEvent, Phase, Simulation};
pub use snapshot::{ActiveSnapshot, BoardGrid, GameSnapshot};
