//! Pieces module - shape catalog, shape matrices and rotation
//!
//! Shapes are small row-major 0/1 matrices stored inline, so a [`Piece`] is a
//! plain `Copy` value: rotating or spawning always yields an independent matrix
//! that cannot alias the catalog or another piece.

use crate::collision::collides;
use crate::types::{Color, PieceKind, BOARD_WIDTH, MAX_SHAPE_DIM, PIECE_CELLS};
use crate::Board;

/// Catalog entry: canonical rotation-0 rows and display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: PieceKind,
    pub rows: &'static [&'static [u8]],
    pub color: Color,
}

/// The fixed catalog, one entry per [`PieceKind`] in `PieceKind::ALL` order.
pub const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        kind: PieceKind::I,
        rows: &[&[1, 1, 1, 1]],
        color: Color::from_hex(0x00f0f0),
    },
    CatalogEntry {
        kind: PieceKind::O,
        rows: &[&[1, 1], &[1, 1]],
        color: Color::from_hex(0xf0f000),
    },
    CatalogEntry {
        kind: PieceKind::T,
        rows: &[&[0, 1, 0], &[1, 1, 1]],
        color: Color::from_hex(0xa000f0),
    },
    CatalogEntry {
        kind: PieceKind::S,
        rows: &[&[0, 1, 1], &[1, 1, 0]],
        color: Color::from_hex(0x00f000),
    },
    CatalogEntry {
        kind: PieceKind::Z,
        rows: &[&[1, 1, 0], &[0, 1, 1]],
        color: Color::from_hex(0xf00000),
    },
    CatalogEntry {
        kind: PieceKind::J,
        rows: &[&[1, 0, 0], &[1, 1, 1]],
        color: Color::from_hex(0x0000f0),
    },
    CatalogEntry {
        kind: PieceKind::L,
        rows: &[&[0, 0, 1], &[1, 1, 1]],
        color: Color::from_hex(0xf0a000),
    },
];

/// Look up the catalog entry for a kind
pub fn catalog_entry(kind: PieceKind) -> &'static CatalogEntry {
    let entry = &CATALOG[kind as usize];
    assert_eq!(entry.kind, kind, "catalog order does not match PieceKind");
    entry
}

/// Rectangular 0/1 shape matrix, row-major, top-to-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    rows: u8,
    cols: u8,
    bits: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl ShapeMatrix {
    /// Build a matrix from literal rows.
    ///
    /// # Panics
    ///
    /// Panics on malformed data: empty or ragged rows, values other than 0/1,
    /// sides larger than [`MAX_SHAPE_DIM`], or a cell count other than
    /// [`PIECE_CELLS`].
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_DIM,
            "shape must have 1..={} rows, got {}",
            MAX_SHAPE_DIM,
            rows.len()
        );
        let cols = rows[0].len();
        assert!(
            cols > 0 && cols <= MAX_SHAPE_DIM,
            "shape must have 1..={} columns, got {}",
            MAX_SHAPE_DIM,
            cols
        );

        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let mut filled = 0usize;
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "shape row {} is ragged", r);
            for (c, &v) in row.iter().enumerate() {
                assert!(v <= 1, "shape cell ({}, {}) is {}, expected 0 or 1", r, c, v);
                if v == 1 {
                    bits[r][c] = true;
                    filled += 1;
                }
            }
        }
        assert_eq!(filled, PIECE_CELLS, "shape must have {} cells", PIECE_CELLS);

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            bits,
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether (row, col) is occupied; false outside the matrix
    pub fn is_filled(&self, row: u8, col: u8) -> bool {
        row < self.rows && col < self.cols && self.bits[row as usize][col as usize]
    }

    /// Occupied cells as (row, col), in row-major order
    pub fn cells(&self) -> [(u8, u8); PIECE_CELLS] {
        let mut out = [(0u8, 0u8); PIECE_CELLS];
        let mut i = 0;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.bits[r as usize][c as usize] {
                    out[i] = (r, c);
                    i += 1;
                }
            }
        }
        out
    }

    /// 90° clockwise rotation: row `i` of the result is column `i` of `self`
    /// read bottom-to-top.
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        let rows = self.rows as usize;
        for (i, out_row) in bits.iter_mut().enumerate().take(self.cols as usize) {
            for (j, out_cell) in out_row.iter_mut().enumerate().take(rows) {
                *out_cell = self.bits[rows - 1 - j][i];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            bits,
        }
    }

    /// Rows as 0/1 values, for display and serialization
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.rows)
            .map(|r| (0..self.cols).map(|c| self.is_filled(r, c) as u8).collect())
            .collect()
    }
}

/// A piece: shape, color tag and board anchor (top-left of the matrix).
///
/// `y` may be negative while the piece is partly above the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: ShapeMatrix,
    pub color: Color,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Spawn a piece of the given kind, horizontally centered on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let entry = catalog_entry(kind);
        let shape = ShapeMatrix::from_rows(entry.rows);
        Self {
            kind,
            shape,
            color: entry.color,
            x: spawn_x(shape.cols()),
            y: 0,
        }
    }

    /// Same piece with the shape rotated 90° clockwise; anchor unchanged
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute board coordinates (x, y) of the occupied cells
    pub fn board_cells(&self) -> [(i16, i16); PIECE_CELLS] {
        self.shape
            .cells()
            .map(|(r, c)| (self.x as i16 + c as i16, self.y as i16 + r as i16))
    }
}

/// Spawn column for a shape width: `floor(W/2) - floor(width/2)`
pub fn spawn_x(shape_width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape_width / 2) as i8
}

/// Column shifts probed after a rotation, in order
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// Rotate with the 3-probe wall kick.
///
/// Tries the rotated shape in place, then one column left, then one column
/// right. Returns the first legal placement, or `None` when every probe
/// collides (the caller keeps the original piece).
pub fn try_rotate(piece: &Piece, board: &Board) -> Option<Piece> {
    let rotated = piece.rotated();
    KICK_OFFSETS
        .iter()
        .find(|&&dx| !collides(&rotated, board, dx, 0))
        .map(|&dx| rotated.shifted(dx, 0))
}
