use crate::pieces::{Matrix, Tetromino};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_DROP_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Absolute grid coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (x, y) = (self.x, self.y);
        self.matrix.occupied().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session, handed to the renderer.
///
/// `board` holds colour indices: 0 is empty, 1..=7 is [`PieceKind::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
            seed: 0,
        }
    }
}
