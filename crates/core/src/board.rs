//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are open space: they never block a piece and
//! never receive merged cells.

use arrayvec::ArrayVec;

use crate::pieces::Tetromino;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const ROWS: usize = BOARD_HEIGHT as usize;
const COLS: usize = BOARD_WIDTH as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
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
        Some((y as usize) * COLS + (x as usize))
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

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a piece cell at (x, y) would be blocked.
    ///
    /// Side walls and the floor block; so does any filled cell. Anything
    /// above row 0 is open as long as it is between the side walls.
    #[inline(always)]
    pub fn is_blocked(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        y >= 0 && self.is_occupied(x, y)
    }

    /// Whether any occupied cell of `piece` is blocked at the piece's position
    pub fn collides(&self, piece: &Tetromino) -> bool {
        piece.cells().any(|(x, y)| self.is_blocked(x, y))
    }

    /// Stamp the piece's kind into every in-bounds cell it occupies.
    ///
    /// Cells above the board are dropped. Collision is not re-checked here;
    /// callers merge a piece at a position that already passed `collides`.
    pub fn merge(&mut self, piece: &Tetromino) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top).
    ///
    /// Rows above each cleared row fall by one per cleared row below them and
    /// empty rows fill in from the top. Uses a two-pointer pass with no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, ROWS> {
        let mut cleared_rows = ArrayVec::new();
        let mut write_y = ROWS;

        // Scan from bottom to top
        for read_y in (0..ROWS).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * COLS;
                    self.cells
                        .copy_within(src_start..src_start + COLS, write_y * COLS);
                }
            }
        }

        // Clear the remaining rows at the top
        self.cells[..write_y * COLS].fill(None);

        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write colour indices (0 = empty, 1..=7 = piece kind) into `out`
    pub fn write_u8_grid(&self, out: &mut [[u8; COLS]; ROWS]) {
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s.map_or(0, |kind| kind.index());
            }
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
    use crate::types::PieceKind;

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
    fn test_blocked_above_board_only_at_walls() {
        let board = Board::new();
        assert!(!board.is_blocked(0, -1));
        assert!(!board.is_blocked(9, -3));
        assert!(board.is_blocked(-1, -1));
        assert!(board.is_blocked(10, -1));
        assert!(board.is_blocked(0, 20));
    }

    #[test]
    fn test_merge_skips_cells_above_board() {
        let mut board = Board::new();
        let piece = Tetromino {
            y: -1,
            ..Tetromino::spawn(PieceKind::O)
        };
        board.merge(&piece);

        let filled = board.cells().iter().filter(|c| c.is_some()).count();
        assert_eq!(filled, 2);
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_clear_more_than_four_rows() {
        let mut board = Board::new();
        for y in 14..20 {
            for x in 0..BOARD_WIDTH as i8 {
                board.set(x, y, Some(PieceKind::I));
            }
        }
        board.set(2, 13, Some(PieceKind::Z));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.len(), 6);
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::Z)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_write_u8_grid() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::I));
        board.set(9, 0, Some(PieceKind::Z));

        let mut grid = [[0u8; COLS]; ROWS];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[19][0], 1);
        assert_eq!(grid[0][9], 7);
        assert_eq!(grid.iter().flatten().filter(|&&v| v != 0).count(), 2);
    }
}
