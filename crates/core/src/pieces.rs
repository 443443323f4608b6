//! Pieces module - shape templates, rotation and the active piece
//!
//! Every piece kind has one immutable template matrix. A falling piece owns a
//! copy of that matrix; rotating builds a new matrix and never touches the
//! template. Rotation uses a small horizontal kick search (stay, left, right)
//! rather than a per-shape kick table.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest side of any template (the I piece rotated upright is 1x4)
pub const MAX_DIM: usize = 4;

/// Horizontal offsets tried, in order, after a rotation
pub const KICK_OFFSETS: [i8; 3] = [0, -1, 1];

/// A small occupancy matrix, at most `MAX_DIM` x `MAX_DIM`.
///
/// Cells outside `width` x `height` are always empty, so derived equality
/// compares only the meaningful area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    width: u8,
    height: u8,
    /// Row-major occupancy, `cells[row][col]`
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl Matrix {
    /// Build a matrix from rows of `0`/`1` values.
    ///
    /// Rows must be non-empty, equally long and at most `MAX_DIM` in either
    /// direction; anything else is a programming error.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_DIM,
            "matrix height out of range"
        );
        let width = rows[0].len();
        assert!(width > 0 && width <= MAX_DIM, "matrix width out of range");

        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), width, "ragged matrix rows");
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = v != 0;
            }
        }

        Self {
            width: width as u8,
            height: rows.len() as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left corner
    pub fn occupied(self) -> impl Iterator<Item = (i8, i8)> {
        let (w, h) = (self.width as usize, self.height as usize);
        (0..h).flat_map(move |y| {
            (0..w)
                .filter(move |&x| self.cells[y][x])
                .map(move |x| (x as i8, y as i8))
        })
    }

    /// Rows as `0`/`1` vectors, mostly for assertions and debugging
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        (0..self.height as usize)
            .map(|y| {
                (0..self.width as usize)
                    .map(|x| self.cells[y][x] as u8)
                    .collect()
            })
            .collect()
    }

    /// Rotate 90° clockwise.
    ///
    /// Row `i` of the result is column `i` of `self` read bottom to top, so
    /// the result has width and height swapped.
    pub fn rotate_cw(&self) -> Self {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (i, row) in cells.iter_mut().enumerate().take(w) {
            for (j, cell) in row.iter_mut().enumerate().take(h) {
                *cell = self.cells[h - 1 - j][i];
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const I_ROWS: &[&[u8]] = &[&[1, 1, 1, 1]];
const J_ROWS: &[&[u8]] = &[&[1, 0, 0], &[1, 1, 1]];
const L_ROWS: &[&[u8]] = &[&[0, 0, 1], &[1, 1, 1]];
const O_ROWS: &[&[u8]] = &[&[1, 1], &[1, 1]];
const S_ROWS: &[&[u8]] = &[&[0, 1, 1], &[1, 1, 0]];
const T_ROWS: &[&[u8]] = &[&[0, 1, 0], &[1, 1, 1]];
const Z_ROWS: &[&[u8]] = &[&[1, 1, 0], &[0, 1, 1]];

/// Template rows for a piece kind
pub fn template_rows(kind: PieceKind) -> &'static [&'static [u8]] {
    match kind {
        PieceKind::I => I_ROWS,
        PieceKind::J => J_ROWS,
        PieceKind::L => L_ROWS,
        PieceKind::O => O_ROWS,
        PieceKind::S => S_ROWS,
        PieceKind::T => T_ROWS,
        PieceKind::Z => Z_ROWS,
    }
}

/// A fresh copy of the spawn orientation of `kind`
pub fn template(kind: PieceKind) -> Matrix {
    Matrix::from_rows(template_rows(kind))
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Current orientation, owned by this piece
    pub matrix: Matrix,
    /// Grid column of the matrix's left edge
    pub x: i8,
    /// Grid row of the matrix's top edge
    pub y: i8,
}

impl Tetromino {
    /// Create a piece at its spawn position: centered horizontally on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = template(kind);
        Self {
            kind,
            matrix,
            x: (BOARD_WIDTH as i8 - matrix.width() as i8) / 2,
            y: 0,
        }
    }

    /// Same piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece rotated 90° clockwise in place (no kick applied)
    pub fn rotated(&self) -> Self {
        Self {
            matrix: self.matrix.rotate_cw(),
            ..*self
        }
    }

    /// Absolute grid coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.matrix.occupied().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Try to rotate a piece with the horizontal kick search.
///
/// The rotated candidate is tested at the current column, then one column
/// left, then one column right. Returns the first candidate that does not
/// collide, or `None` when every offset collides.
pub fn try_rotate(
    piece: &Tetromino,
    collides: impl Fn(&Tetromino) -> bool,
) -> Option<Tetromino> {
    let rotated = piece.rotated();
    KICK_OFFSETS
        .iter()
        .map(|&dx| rotated.shifted(dx, 0))
        .find(|candidate| !collides(candidate))
}
