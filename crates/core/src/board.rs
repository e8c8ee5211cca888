//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the color tag of
//! the piece that settled there. Storage is a flat row-major array, so the
//! board never allocates and clones are cheap.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::Piece;

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
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

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
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

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// One row of cells, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Copy the piece color into every occupied shape cell that is on the board.
    ///
    /// Cells above the top edge are dropped. No collision check: callers only
    /// merge placements the oracle accepted.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.board_cells() {
            if y < 0 {
                continue;
            }
            self.set(x as i8, y as i8, Some(piece.color));
        }
    }

    /// Remove row `y`, shifting every row above it down by one and opening an
    /// empty row at the top.
    pub fn remove_row(&mut self, y: usize) {
        if y >= HEIGHT {
            return;
        }
        // copy_within handles the overlapping ranges.
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Clear all full rows and return how many were removed.
    ///
    /// Scans bottom to top. After a removal the same index is examined again,
    /// since the row that slid into it has not been checked yet.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = HEIGHT;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.remove_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Copy into a 2D grid (row-major), for snapshots
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.copy_from_slice(src);
        }
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
    use crate::types::{Color, PieceKind};

    const GRAY: Color = Color::from_hex(0x808080);

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(GRAY));
        }
    }

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
    fn test_merge_writes_piece_color() {
        let mut board = Board::new();
        let piece = Piece::spawn(PieceKind::Z).shifted(0, 10);
        board.merge(&piece);

        assert_eq!(board.filled_count(), 4);
        for (x, y) in piece.board_cells() {
            assert_eq!(board.get(x as i8, y as i8), Some(Some(piece.color)));
        }
    }

    #[test]
    fn test_merge_drops_cells_above_board() {
        let mut board = Board::new();
        // Vertical I with its top three cells above row 0.
        let piece = Piece::spawn(PieceKind::I).rotated().shifted(0, -3);
        board.merge(&piece);

        assert_eq!(board.filled_count(), 1);
        assert!(board.is_occupied(piece.x, 0));
    }

    #[test]
    fn test_remove_row_shifts_rows_above() {
        let mut board = Board::new();
        board.set(0, 0, Some(GRAY));
        board.set(1, 5, Some(GRAY));
        board.set(2, 6, Some(GRAY));

        board.remove_row(6);

        assert!(board.row(0).iter().all(|c| c.is_none()));
        assert!(board.is_occupied(0, 1));
        assert!(board.is_occupied(1, 6));
        assert!(!board.is_occupied(2, 6));
    }

    #[test]
    fn test_clear_rescans_same_index() {
        let mut board = Board::new();
        fill_row(&mut board, 18);
        fill_row(&mut board, 19);
        board.set(3, 17, Some(GRAY));

        assert_eq!(board.clear_full_lines(), 2);
        assert_eq!(board.filled_count(), 1);
        assert!(board.is_occupied(3, 19));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(0, 18, Some(GRAY));
        fill_row(&mut board, 17);
        board.set(9, 16, Some(GRAY));

        assert_eq!(board.clear_full_lines(), 2);
        assert!(board.is_occupied(0, 19));
        assert!(board.is_occupied(9, 18));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_clear_full_board() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i8 {
            fill_row(&mut board, y);
        }
        assert_eq!(board.clear_full_lines(), BOARD_HEIGHT as usize);
        assert_eq!(board, Board::new());
    }
}
