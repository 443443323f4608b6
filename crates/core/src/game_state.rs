//! Game state module - one complete play session
//!
//! Ties together the board, the active piece, the randomizer and the scoring
//! rules, and exposes the command API the input source and the frame clock
//! drive: move, rotate, soft drop, hard drop, tick and reset.
//!
//! A session is either playing or over. It becomes over only when a freshly
//! spawned piece collides, and only `reset` brings it back. While over, every
//! other command is a no-op.

use log::{debug, info};

use crate::board::Board;
use crate::pieces::{try_rotate, Tetromino};
use crate::rng::PieceRandomizer;
use crate::scoring::{drop_interval_ms, line_clear_score};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, PieceKind, INITIAL_DROP_MS};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Tetromino,
    randomizer: PieceRandomizer,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Monotonic id of spawned pieces, including the one that ended the game.
    piece_id: u32,
    score: u32,
    lines: u32,
    drop_interval_ms: u32,
    /// Gravity accumulator, reset whenever the piece is dropped.
    drop_timer_ms: u32,
    game_over: bool,
}

impl GameState {
    /// Create a new session with the given RNG seed and spawn its first piece
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: Tetromino::spawn(PieceKind::I),
            randomizer: PieceRandomizer::new(seed),
            episode_id: 0,
            piece_id: 0,
            score: 0,
            lines: 0,
            drop_interval_ms: INITIAL_DROP_MS,
            drop_timer_ms: 0,
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_timer_ms(&self) -> u32 {
        self.drop_timer_ms
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    pub fn active(&self) -> Tetromino {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions (tests, benches, replays).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = Some(ActiveSnapshot::from(self.active));
        out.score = self.score;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
        out.game_over = self.game_over;
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.seed = self.randomizer.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a random piece
    ///
    /// Returns false if the new piece collides, which ends the session.
    /// No-op once the session is over.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let kind = self.randomizer.draw();
        self.spawn_kind(kind)
    }

    /// Spawn a piece of the given kind at the top-center of the board.
    ///
    /// The piece is installed even when it collides; the session is then over.
    /// No-op once the session is over.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if self.game_over {
            return false;
        }
        self.active = Tetromino::spawn(kind);
        self.piece_id = self.piece_id.wrapping_add(1);

        if self.board.collides(&self.active) {
            self.game_over = true;
            info!(
                "game over: episode={} score={} lines={} pieces={}",
                self.episode_id, self.score, self.lines, self.piece_id
            );
            return false;
        }

        debug!(
            "spawned {:?} at ({}, {}) piece_id={}",
            kind, self.active.x, self.active.y, self.piece_id
        );
        true
    }

    /// Try to move the active piece; a blocked move leaves it where it was
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }

        let candidate = self.active.shifted(dx, dy);
        if self.board.collides(&candidate) {
            return false;
        }
        self.active = candidate;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotate the active piece clockwise, kicking one column left or right if needed.
    ///
    /// The piece is replaced only once a non-colliding position is found.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        match try_rotate(&self.active, |candidate| self.board.collides(candidate)) {
            Some(rotated) => {
                self.active = rotated;
                true
            }
            None => false,
        }
    }

    /// Drop the active piece by one row, locking it if it cannot fall.
    ///
    /// Returns true if the piece moved down. Resets the gravity accumulator.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let moved = self.try_move(0, 1);
        if !moved {
            self.lock_piece();
        }
        self.drop_timer_ms = 0;
        moved
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows the piece fell.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }

        let mut distance: i8 = 0;
        while !self.board.collides(&self.active.shifted(0, distance + 1)) {
            distance += 1;
        }
        self.active = self.active.shifted(0, distance);

        self.lock_piece();
        self.drop_timer_ms = 0;
        distance as u32
    }

    /// Merge the active piece into the board, clear lines, and spawn the next piece
    fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        self.board.merge(&self.active);
        self.clear_lines();
        self.spawn_piece();
    }

    /// Remove every full row and apply the batch score and gravity update.
    ///
    /// Returns the number of rows cleared; zero leaves score, lines and gravity untouched.
    /// No-op once the session is over.
    pub fn clear_lines(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let cleared = self.board.clear_full_rows().len() as u32;
        if cleared == 0 {
            return 0;
        }

        self.lines = self.lines.saturating_add(cleared);
        self.score = self.score.saturating_add(line_clear_score(cleared));
        self.drop_interval_ms = drop_interval_ms(self.lines);

        debug!(
            "cleared {} lines: score={} lines={} drop_interval={}ms",
            cleared, self.score, self.lines, self.drop_interval_ms
        );
        cleared
    }

    /// Advance the gravity clock by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the drop interval the piece soft-drops
    /// and the accumulator restarts. Returns true if a drop happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms > self.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    /// Start over: empty board, zeroed counters, initial gravity, new piece
    pub fn reset(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.drop_interval_ms = INITIAL_DROP_MS;
        self.drop_timer_ms = 0;
        self.game_over = false;
        self.episode_id = self.episode_id.wrapping_add(1);

        info!("reset: episode={}", self.episode_id);
        self.spawn_piece();
    }

    /// Apply a game action
    ///
    /// Returns true if the action changed the session.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::Rotate => self.rotate(),
            GameAction::SoftDrop => {
                if self.game_over {
                    return false;
                }
                self.soft_drop();
                true
            }
            GameAction::HardDrop => {
                if self.game_over {
                    return false;
                }
                self.hard_drop();
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Matrix;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn fill_row_except(state: &mut GameState, y: i8, hole: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != hole {
                state.board_mut().set(x, y, Some(PieceKind::J));
            }
        }
    }

    /// Force the session into the terminal state by blocking the spawn rows.
    fn end_game(state: &mut GameState) {
        for y in 0..2 {
            for x in 0..BOARD_WIDTH as i8 {
                if x % 2 == 0 || y == 1 {
                    state.board_mut().set(x, y, Some(PieceKind::Z));
                }
            }
        }
        assert!(!state.spawn_kind(PieceKind::O));
        assert!(state.game_over());
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 800);
        assert_eq!(state.drop_timer_ms(), 0);
        assert_eq!(state.episode_id(), 0);
        assert_eq!(state.piece_id(), 1);
        assert_eq!(state.active().y, 0);
        assert_eq!(state.seed(), 12345);
    }

    #[test]
    fn test_spawn_kind_position() {
        let mut state = GameState::new(1);
        assert!(state.spawn_kind(PieceKind::O));
        assert_eq!((state.active().x, state.active().y), (4, 0));

        assert!(state.spawn_kind(PieceKind::I));
        assert_eq!((state.active().x, state.active().y), (3, 0));
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::O);

        for _ in 0..4 {
            assert!(state.move_left());
        }
        assert_eq!(state.active().x, 0);
        assert!(!state.move_left());
        assert_eq!(state.active().x, 0);
    }

    #[test]
    fn test_move_blocked_by_cells() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::O);
        state.board_mut().set(6, 1, Some(PieceKind::T));

        assert!(!state.move_right());
        assert_eq!(state.active().x, 4);
    }

    #[test]
    fn test_rotate_changes_matrix() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::I);
        state.try_move(0, 2);

        assert!(state.rotate());
        assert_eq!(state.active().matrix.width(), 1);
        assert_eq!(state.active().matrix.height(), 4);
        assert_eq!(state.active().x, 3);
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::T);
        state.try_move(0, 3);
        // Upright T (2 wide) against the right wall.
        assert!(state.rotate());
        while state.move_right() {}
        assert_eq!(state.active().x, 8);

        // Rotating back to 3 wide at x=8 would cross the wall; the kick moves it left.
        assert!(state.rotate());
        assert_eq!(state.active().matrix.width(), 3);
        assert_eq!(state.active().x, 7);
    }

    #[test]
    fn test_rotate_abandoned_when_boxed_in() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::I);
        for _ in 0..5 {
            state.try_move(0, 1);
        }
        let before = state.active();
        // Rows above and below the flat I are full except under the piece itself.
        for x in 0..BOARD_WIDTH as i8 {
            state.board_mut().set(x, 4, Some(PieceKind::Z));
            state.board_mut().set(x, 6, Some(PieceKind::Z));
        }

        assert!(!state.rotate());
        assert_eq!(state.active(), before);
    }

    #[test]
    fn test_soft_drop_moves_and_resets_timer() {
        let mut state = GameState::new(1);
        state.tick(300);
        assert_eq!(state.drop_timer_ms(), 300);

        let y = state.active().y;
        assert!(state.soft_drop());
        assert_eq!(state.active().y, y + 1);
        assert_eq!(state.drop_timer_ms(), 0);
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::O);
        while state.soft_drop() {}

        assert_eq!(state.board().get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board().get(5, 18), Some(Some(PieceKind::O)));
        assert_eq!(state.piece_id(), 3);
        assert_eq!(state.active().y, 0);
    }

    #[test]
    fn test_hard_drop() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::I);

        let distance = state.hard_drop();
        assert_eq!(distance, (BOARD_HEIGHT - 1) as u32);
        for x in 3..7 {
            assert_eq!(state.board().get(x, 19), Some(Some(PieceKind::I)));
        }
        assert_eq!(state.drop_timer_ms(), 0);
    }

    #[test]
    fn test_hard_drop_lands_on_stack() {
        let mut state = GameState::new(1);
        state.board_mut().set(4, 10, Some(PieceKind::S));
        state.spawn_kind(PieceKind::O);

        assert_eq!(state.hard_drop(), 8);
        assert_eq!(state.board().get(4, 9), Some(Some(PieceKind::O)));
        assert_eq!(state.board().get(4, 8), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_clear_lines_scores_batch() {
        let mut state = GameState::new(1);
        fill_row_except(&mut state, 18, None);
        fill_row_except(&mut state, 19, None);

        assert_eq!(state.clear_lines(), 2);
        assert_eq!(state.score(), 400);
        assert_eq!(state.lines(), 2);
        assert_eq!(state.drop_interval_ms(), 760);
    }

    #[test]
    fn test_clear_lines_nothing_full() {
        let mut state = GameState::new(1);
        fill_row_except(&mut state, 19, Some(0));

        assert_eq!(state.clear_lines(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 800);
    }

    #[test]
    fn test_clear_lines_completes_row() {
        let mut state = GameState::new(1);
        fill_row_except(&mut state, 19, Some(5));
        state.board_mut().merge(&Tetromino {
            kind: PieceKind::T,
            matrix: Matrix::from_rows(&[&[1]]),
            x: 5,
            y: 19,
        });

        assert_eq!(state.clear_lines(), 1);
        assert_eq!(state.score(), 100);
        assert_eq!(state.lines(), 1);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_hard_drop_clears_line() {
        let mut state = GameState::new(1);
        for x in 0..BOARD_WIDTH as i8 {
            if !(3..7).contains(&x) {
                state.board_mut().set(x, 19, Some(PieceKind::L));
            }
        }
        state.spawn_kind(PieceKind::I);
        state.hard_drop();

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 100);
        assert!(!state.board().is_row_full(19));
    }

    #[test]
    fn test_tick_gravity() {
        let mut state = GameState::new(1);
        let y = state.active().y;

        // Exactly the interval is not enough; it has to be exceeded.
        assert!(!state.tick(800));
        assert_eq!(state.active().y, y);

        assert!(state.tick(1));
        assert_eq!(state.active().y, y + 1);
        assert_eq!(state.drop_timer_ms(), 0);
    }

    #[test]
    fn test_tick_accumulates_small_steps() {
        let mut state = GameState::new(1);
        let y = state.active().y;
        for _ in 0..50 {
            state.tick(16);
        }
        assert_eq!(state.active().y, y);
        assert!(state.tick(16));
        assert_eq!(state.active().y, y + 1);
    }

    #[test]
    fn test_game_over_detection() {
        let mut state = GameState::new(1);
        end_game(&mut state);
        assert_eq!(state.active().kind, PieceKind::O);
    }

    #[test]
    fn test_game_over_stops_commands() {
        let mut state = GameState::new(1);
        end_game(&mut state);

        let board = state.board().clone();
        let active = state.active();
        let (score, lines) = (state.score(), state.lines());

        assert!(!state.move_left());
        assert!(!state.move_right());
        assert!(!state.rotate());
        assert!(!state.soft_drop());
        assert_eq!(state.hard_drop(), 0);
        assert!(!state.tick(10_000));
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.apply_action(GameAction::HardDrop));

        assert_eq!(state.board(), &board);
        assert_eq!(state.active(), active);
        assert_eq!((state.score(), state.lines()), (score, lines));
        assert_eq!(state.drop_timer_ms(), 0);
    }

    #[test]
    fn test_game_over_freezes_spawn_and_lock() {
        let mut state = GameState::new(1);
        end_game(&mut state);
        let before = state.snapshot();

        state.lock_piece();
        assert!(!state.spawn_piece());
        assert!(!state.spawn_kind(PieceKind::I));
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::new(1);
        fill_row_except(&mut state, 19, None);
        state.clear_lines();
        end_game(&mut state);

        state.reset();
        assert!(!state.game_over());
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 800);
        assert_eq!(state.episode_id(), 1);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
        assert!(!state.board().collides(&state.active()));
    }

    #[test]
    fn test_apply_action_restart() {
        let mut state = GameState::new(1);
        end_game(&mut state);
        assert!(state.apply_action(GameAction::Restart));
        assert!(!state.game_over());
        assert_eq!(state.episode_id(), 1);
    }

    #[test]
    fn test_apply_action_move() {
        let mut state = GameState::new(1);
        state.spawn_kind(PieceKind::T);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().x, 2);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active().x, 3);
    }

    #[test]
    fn test_snapshot() {
        let mut state = GameState::new(7);
        state.spawn_kind(PieceKind::S);
        state.board_mut().set(0, 19, Some(PieceKind::I));

        let snap = state.snapshot();
        assert_eq!(snap.board[19][0], 1);
        let active = snap.active.unwrap();
        assert_eq!(active.kind, PieceKind::S);
        assert_eq!((active.x, active.y), (3, 0));
        assert_eq!(snap.drop_interval_ms, 800);
        assert_eq!(snap.seed, 7);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = GameState::new(42);
        let mut b = GameState::new(42);
        for _ in 0..30 {
            a.hard_drop();
            b.hard_drop();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
