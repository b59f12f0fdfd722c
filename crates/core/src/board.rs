//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows with y < 0 sit above the visible board: a falling piece may occupy them,
//! but nothing is ever written there.

use crate::pieces::Tetromino;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Outcome of writing a piece into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Every cell landed inside the visible board.
    Locked,
    /// At least one cell was above the top edge; the match is over.
    Overflow,
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a falling piece may cover (x, y).
    ///
    /// Columns are always bounded and the floor is solid. Above the top edge
    /// every in-range column is open.
    #[inline]
    pub fn is_open(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// True iff every cell of `piece` is open.
    pub fn is_valid_placement(&self, piece: &Tetromino) -> bool {
        piece.cells().iter().all(|&(x, y)| self.is_open(x, y))
    }

    /// Lock `piece` into the board.
    ///
    /// Cells inside the grid are written; a cell above the top edge is
    /// reported as [`Placement::Overflow`].
    pub fn place(&mut self, piece: &Tetromino) -> Placement {
        let mut placement = Placement::Locked;
        for (x, y) in piece.cells() {
            if y < 0 {
                placement = Placement::Overflow;
                continue;
            }
            self.set(x, y, Some(piece.kind));
        }
        placement
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Remove every full row, compact the rest downwards and refill the top
    /// with empty rows. Returns how many rows were removed.
    ///
    /// Two-pointer pass from the bottom up, entirely in place.
    pub fn clear_full_rows(&mut self) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        let mut cleared = 0;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }

            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid out as cell values (0 empty, 1..=7 piece kind).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (row_out, row) in out.iter_mut().zip(self.cells.chunks_exact(BOARD_WIDTH as usize)) {
            for (v, cell) in row_out.iter_mut().zip(row) {
                *v = cell.map_or(0, PieceKind::cell_value);
            }
        }
    }

    /// Build a board from rows of ASCII art, bottom-aligned.
    ///
    /// `.` is empty, any other character is a locked `kind` cell. Handy for
    /// setting up positions in tests and benchmarks.
    pub fn from_rows(rows: &[&str], kind: PieceKind) -> Self {
        let mut board = Self::new();
        let offset = BOARD_HEIGHT as usize - rows.len().min(BOARD_HEIGHT as usize);
        for (i, row) in rows.iter().take(BOARD_HEIGHT as usize).enumerate() {
            for (x, ch) in row.chars().take(BOARD_WIDTH as usize).enumerate() {
                if ch != '.' {
                    board.set(x as i8, (offset + i) as i8, Some(kind));
                }
            }
        }
        board
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn open_cells_above_the_top_edge() {
        let board = Board::new();
        assert!(board.is_open(0, -1));
        assert!(board.is_open(9, -3));
        assert!(!board.is_open(-1, -1));
        assert!(!board.is_open(10, -1));
        assert!(!board.is_open(0, 20));
    }

    #[test]
    fn placement_straddling_the_top_is_valid() {
        let board = Board::new();
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::East,
            x: 0,
            y: -2,
        };
        assert!(board.is_valid_placement(&piece));
    }

    #[test]
    fn place_writes_kind_and_reports_overflow() {
        let mut board = Board::new();
        let piece = Tetromino {
            kind: PieceKind::J,
            rotation: Rotation::East,
            x: 4,
            y: -1,
        };
        // East J: (1,0) (2,0) (1,1) (1,2) → two cells at y = -1.
        assert_eq!(board.place(&piece), Placement::Overflow);
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::J)));
        assert_eq!(board.get(5, 1), Some(Some(PieceKind::J)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn write_u8_grid_uses_kind_plus_one() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::I));
        board.set(9, 19, Some(PieceKind::L));

        let mut grid = [[0u8; 10]; 20];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[0][0], 1);
        assert_eq!(grid[19][9], 7);
        assert_eq!(grid.iter().flatten().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn from_rows_is_bottom_aligned() {
        let board = Board::from_rows(&["#.........", "##########"], PieceKind::T);
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(1, 18));
        assert!(board.is_row_full(19));
    }
}
