//! Pieces module - tetromino shape catalog and the simplified wall kick
//!
//! Shapes are a literal table: 7 kinds × 4 rotation states × 4 cell offsets
//! inside a 4x4 bounding box. Nothing is derived by rotation math.
//!
//! Rotation uses a horizontal-only kick search instead of full SRS: the
//! rotated shape is tried at the same anchor, then shifted by -1, +1, -2, +2
//! columns, and the first valid placement wins.

use thiserror::Error;

use crate::types::{PieceKind, Rotation, SPAWN_POSITION};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shape table indexed by `[kind.index()][rotation.index()]`.
pub type ShapeTable = [[PieceShape; 4]; 7];

/// Side of the bounding box every offset must fit in.
pub const BOUNDING_BOX: i8 = 4;

/// Horizontal offsets tried, in order, when rotating.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

#[rustfmt::skip]
const SHAPES: ShapeTable = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 2), (1, 2), (2, 2), (3, 2)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // O: identical in every state
    [
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(1, 0), (1, 1), (2, 1), (2, 2)],
        [(1, 1), (2, 1), (0, 2), (1, 2)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (1, 1), (2, 1), (1, 2)],
        [(0, 1), (1, 1), (1, 2), (2, 2)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (2, 0), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (0, 2), (1, 2)],
    ],
    // L
    [
        [(2, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
];

// A malformed built-in table is a build failure, not a runtime condition.
const _: () = assert!(validate_table(&SHAPES).is_ok());

static STANDARD: PieceCatalog = PieceCatalog { table: &SHAPES };

/// Reasons [`validate_table`] rejects a shape table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{kind:?} rotation {rotation}: offset ({x}, {y}) lies outside the 4x4 bounding box")]
    OffsetOutOfBounds {
        kind: PieceKind,
        rotation: usize,
        x: i8,
        y: i8,
    },
    #[error("{kind:?} rotation {rotation}: cell ({x}, {y}) appears more than once")]
    DuplicateCell {
        kind: PieceKind,
        rotation: usize,
        x: i8,
        y: i8,
    },
}

/// Immutable lookup table from (kind, rotation) to cell offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCatalog {
    table: &'static ShapeTable,
}

impl PieceCatalog {
    /// The guideline shape table used by the simulation.
    pub fn standard() -> &'static PieceCatalog {
        &STANDARD
    }

    /// Cell offsets for `kind` in `rotation`.
    #[inline]
    pub fn shape_of(&self, kind: PieceKind, rotation: Rotation) -> PieceShape {
        self.table[kind.index()][rotation.index()]
    }
}

/// Check that every offset lies in the bounding box and no rotation state
/// repeats a cell.
pub const fn validate_table(table: &ShapeTable) -> Result<(), CatalogError> {
    let mut k = 0;
    while k < 7 {
        let mut r = 0;
        while r < 4 {
            let shape = &table[k][r];
            let mut i = 0;
            while i < 4 {
                let (x, y) = shape[i];
                if x < 0 || x >= BOUNDING_BOX || y < 0 || y >= BOUNDING_BOX {
                    return Err(CatalogError::OffsetOutOfBounds {
                        kind: PieceKind::ALL[k],
                        rotation: r,
                        x,
                        y,
                    });
                }
                let mut j = 0;
                while j < i {
                    if shape[j].0 == x && shape[j].1 == y {
                        return Err(CatalogError::DuplicateCell {
                            kind: PieceKind::ALL[k],
                            rotation: r,
                            x,
                            y,
                        });
                    }
                    j += 1;
                }
                i += 1;
            }
            r += 1;
        }
        k += 1;
    }
    Ok(())
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    PieceCatalog::standard().shape_of(kind, rotation)
}

/// A piece placed on (or above) the board: kind, rotation and anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at the spawn anchor, rotation 0.
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute board coordinates of the four occupied cells.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// The same piece translated by (dx, dy).
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// The same piece with a different rotation, anchor unchanged.
    pub fn rotated_to(&self, rotation: Rotation) -> Self {
        Self { rotation, ..*self }
    }
}

/// Try to rotate a piece with the horizontal kick search.
///
/// Returns the committed piece and the kick that was used, or `None` if every
/// offset in [`KICK_OFFSETS`] collides.
pub fn try_rotate(
    piece: Tetromino,
    clockwise: bool,
    mut is_valid: impl FnMut(&Tetromino) -> bool,
) -> Option<(Tetromino, i8)> {
    let new_rotation = if clockwise {
        piece.rotation.rotate_cw()
    } else {
        piece.rotation.rotate_ccw()
    };
    let candidate = piece.rotated_to(new_rotation);

    KICK_OFFSETS
        .iter()
        .map(|&dx| (candidate.shifted(dx, 0), dx))
        .find(|(kicked, _)| is_valid(kicked))
}

#[cfg(test)]
mod tests {
    use super::*;

    static OUT_OF_BOX: ShapeTable = {
        let mut t = SHAPES;
        t[2][1] = [(1, 0), (1, 1), (2, 1), (1, 4)];
        t
    };

    static DUPLICATE: ShapeTable = {
        let mut t = SHAPES;
        t[5][3] = [(1, 0), (1, 1), (1, 1), (1, 2)];
        t
    };

    #[test]
    fn standard_table_is_valid() {
        assert_eq!(validate_table(&SHAPES), Ok(()));
    }

    #[test]
    fn rejects_offset_outside_bounding_box() {
        let err = validate_table(&OUT_OF_BOX).unwrap_err();
        assert_eq!(
            err,
            CatalogError::OffsetOutOfBounds {
                kind: PieceKind::T,
                rotation: 1,
                x: 1,
                y: 4,
            }
        );
    }

    #[test]
    fn rejects_duplicate_cell() {
        let err = validate_table(&DUPLICATE).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::DuplicateCell {
                kind: PieceKind::J,
                rotation: 3,
                ..
            }
        ));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn o_piece_states_are_identical() {
        let north = get_shape(PieceKind::O, Rotation::North);
        for r in Rotation::ALL {
            assert_eq!(get_shape(PieceKind::O, r), north);
        }
    }

    #[test]
    fn tetromino_cells_are_anchor_relative() {
        let piece = Tetromino::new(PieceKind::I);
        assert_eq!(piece.cells(), [(3, 1), (4, 1), (5, 1), (6, 1)]);
        assert_eq!(piece.shifted(-3, 2).cells(), [(0, 3), (1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn kick_search_follows_fixed_order() {
        let piece = Tetromino::new(PieceKind::T);
        let mut tried = Vec::new();
        let result = try_rotate(piece, true, |p| {
            tried.push(p.x);
            false
        });
        assert!(result.is_none());
        assert_eq!(tried, vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn kick_search_returns_first_valid_offset() {
        let piece = Tetromino::new(PieceKind::L);
        // Both -1 and +1 would fit; -1 is tried first.
        let (rotated, dx) = try_rotate(piece, false, |p| p.x != 3).unwrap();
        assert_eq!(dx, -1);
        assert_eq!(rotated.x, 2);
        assert_eq!(rotated.rotation, Rotation::West);
    }
}
