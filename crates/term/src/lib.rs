//! Terminal front-end for the simulation.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled glyphs and
//! flushes it to the terminal with `crossterm`. The core never depends on this
//! crate; it only hands out snapshots.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tower_tetris_core as core;
pub use tower_tetris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
