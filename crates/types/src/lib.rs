//! Shared types and constants for the falling-block simulation.
//!
//! Everything here is plain data with no dependencies, so the core, the input
//! mapping and the terminal view can all agree on the same vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn anchor**: (3, 0), rotation 0
//!
//! # Timing
//!
//! The simulation is frame driven. Gravity is measured in frames, not
//! milliseconds:
//!
//! | Level | Frames per row |
//! |-------|----------------|
//! | 0 | 30 |
//! | 1 | 28 |
//! | 5 | 20 |
//! | 14+ | 2 (floor) |
//!
//! # Examples
//!
//! ```
//! use tower_tetris_types::{Command, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(PieceKind::T.cell_value(), 3);
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert!(Command::HardDrop.is_restart_class());
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor (x, y) for every new piece.
pub const SPAWN_POSITION: (i8, i8) = (3, 0);

/// Fixed frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 0, in frames.
pub const GRAVITY_BASE_FRAMES: u32 = 30;

/// Frames removed from the gravity interval per level.
pub const GRAVITY_FRAMES_PER_LEVEL: u32 = 2;

/// Fastest gravity interval, in frames.
pub const GRAVITY_MIN_FRAMES: u32 = 2;

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// How long the terminal front-end keeps soft drop engaged after the last
/// Down key event, for terminals that never report key releases.
pub const SOFT_DROP_GRACE_FRAMES: u32 = 9;

/// Line clear scoring table (classic)
///
/// Base points for clearing N lines with one piece, multiplied by
/// `level + 1`:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order. This is also the unshuffled bag order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Zero-based position in [`PieceKind::ALL`].
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Value written into a locked board cell (1..=7, 0 means empty).
    pub const fn cell_value(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Inverse of [`PieceKind::cell_value`].
    pub fn from_cell_value(v: u8) -> Option<Self> {
        match v {
            1..=7 => Some(Self::ALL[(v - 1) as usize]),
            _ => None,
        }
    }

    /// Uppercase letter, as shown next to the NEXT label.
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }
}

/// Rotation state of a piece.
///
/// The cycle goes North (0) → East (1) → South (2) → West (3) → North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotation index in 0..4.
    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tower_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tower_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }
}

/// Discrete input commands, delivered in arrival order once per frame.
///
/// Soft drop is not a command: it is a level-state flag sampled per frame
/// and passed to `Session::tick` separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop to the lowest valid row and lock
    HardDrop,
    /// Start a new game (honoured only after game over)
    Restart,
}

impl Command {
    /// Commands that start a new game from the game-over screen.
    ///
    /// The hard-drop key doubles as "press to restart".
    pub fn is_restart_class(&self) -> bool {
        matches!(self, Command::Restart | Command::HardDrop)
    }
}

/// A cell on the game board: `None` is empty, `Some(kind)` is locked.
pub type Cell = Option<PieceKind>;
