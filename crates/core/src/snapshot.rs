//! Read-only view of a session for renderers.
//!
//! Everything is copied out by value, so a snapshot can be held across frames
//! without borrowing the session.

use crate::pieces::Tetromino;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Board grid as cell values: 0 empty, 1..=7 locked piece kind.
pub type BoardGrid = [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    /// Absolute board coordinates; rows may be negative above the board.
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
        }
    }
}

impl ActiveSnapshot {
    /// The active cells with the anchor moved to row `y` (e.g. the ghost row).
    pub fn cells_at(&self, y: i8) -> [(i8, i8); 4] {
        let dy = y - self.y;
        self.cells.map(|(x, cy)| (x, cy + dy))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    /// Falling piece; `None` once the match is over.
    pub active: Option<ActiveSnapshot>,
    /// Landing row of the falling piece.
    pub ghost_y: Option<i8>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub gravity_frames: u32,
    pub piece_id: u32,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Locked kind at (x, y), if any.
    pub fn locked_at(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&v| PieceKind::from_cell_value(v))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            level: 0,
            gravity_frames: 0,
            piece_id: 0,
            game_over: false,
        }
    }
}
