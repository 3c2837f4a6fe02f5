use std::{ops::Range, time::Duration};

use crate::{
    BOARD_HEIGHT, BOARD_WIDTH, Board, CommandError, FallingPiece, MAX_SHAPE_SIZE, Piece,
    PieceCollisionError, PiecePosition, RestoreError,
};

use super::{
    GameStats, MAX_LEVEL, PieceQueue, PieceSeed,
    saved_game::{SavedGame, board_from_rows, board_to_rows},
};

/// Rows moved by a single soft drop.
const SOFT_DROP_ROWS: i32 = 2;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const BOARD_WIDTH_I32: i32 = BOARD_WIDTH as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const BOARD_HEIGHT_I32: i32 = BOARD_HEIGHT as i32;
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const SHAPE_MARGIN: i32 = MAX_SHAPE_SIZE as i32 - 1;

/// Falling piece positions accepted from a save. Soft drops can push a piece
/// at most two rows past the bottom.
const RESTORE_X_RANGE: Range<i32> = -SHAPE_MARGIN..BOARD_WIDTH_I32;
const RESTORE_Y_RANGE: Range<i32> = -SHAPE_MARGIN..BOARD_HEIGHT_I32 + SOFT_DROP_ROWS;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// What a gravity tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The session is paused or over; nothing changed.
    Skipped,
    /// There was no falling piece and one was spawned.
    Spawned,
    /// The falling piece moved down one row.
    Fell,
    /// The falling piece locked, rows were cleared and the next piece spawned.
    Locked { cleared_lines: usize },
    /// The next piece could not be placed. Reported once; later ticks are skipped.
    GameOver,
}

/// A single game: board, falling piece, upcoming piece, statistics and play
/// state.
///
/// Gravity is driven from outside by calling [`GameSession::tick`] every
/// [`GameSession::tick_interval`]. Player commands return
/// `Err(CommandError)` and leave the session untouched when rejected.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, TickOutcome};
///
/// let mut session = GameSession::new();
/// _ = session.try_move_left();
/// _ = session.try_rotate();
///
/// assert_eq!(session.tick(), TickOutcome::Fell);
///
/// session.toggle_pause();
/// assert_eq!(session.tick(), TickOutcome::Skipped);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    falling_piece: Option<FallingPiece>,
    piece_queue: PieceQueue,
    stats: GameStats,
    session_state: SessionState,
    elapsed: Duration,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a new game with a random piece sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_piece_queue(PieceQueue::new())
    }

    /// Starts a new game whose piece sequence is determined by `seed`.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::with_piece_queue(PieceQueue::with_seed(seed))
    }

    fn with_piece_queue(piece_queue: PieceQueue) -> Self {
        let mut this = Self {
            board: Board::INITIAL,
            falling_piece: None,
            piece_queue,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            elapsed: Duration::ZERO,
        };
        // the board is empty, so the first spawn always succeeds
        _ = this.spawn_piece();
        this
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece, if one has been spawned.
    ///
    /// After game over this is the piece that could not be placed.
    #[must_use]
    pub fn falling_piece(&self) -> Option<&FallingPiece> {
        self.falling_piece.as_ref()
    }

    #[must_use]
    pub fn next_piece(&self) -> Piece {
        self.piece_queue.peek_next()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    /// Returns the play time, excluding time spent paused.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Returns how long to wait between gravity ticks at the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.stats.tick_interval()
    }

    /// Adds `dt` to the play time. Ignored unless playing.
    pub fn advance_time(&mut self, dt: Duration) {
        if self.session_state.is_playing() {
            self.elapsed += dt;
        }
    }

    /// Flips between playing and paused. Has no effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Applies one step of gravity.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.session_state.is_playing() {
            return TickOutcome::Skipped;
        }
        let Some(falling) = self.falling_piece else {
            return match self.spawn_piece() {
                Ok(()) => TickOutcome::Spawned,
                Err(PieceCollisionError) => TickOutcome::GameOver,
            };
        };
        let moved = falling.moved(0, 1);
        if !self.board.is_colliding(&moved) {
            self.falling_piece = Some(moved);
            return TickOutcome::Fell;
        }
        self.lock_piece(&falling)
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.try_update_falling_piece(|piece| piece.moved(-1, 0))
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.try_update_falling_piece(|piece| piece.moved(1, 0))
    }

    /// Rotates the falling piece a quarter turn clockwise. There are no wall
    /// kicks: a rotation that collides is rejected.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.try_update_falling_piece(FallingPiece::rotated_right)
    }

    /// Moves the falling piece down two rows without a collision check.
    ///
    /// The piece may end up overlapping locked cells or below the bottom.
    /// Moves and rotations from there are rejected while the overlap persists.
    /// The next tick only checks the row below: if that is free, the piece
    /// keeps falling through the stack, otherwise it locks where it stands.
    ///
    /// A piece whose top is already below the bottom row cannot drop further.
    pub fn try_soft_drop(&mut self) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let falling = self.falling_piece.ok_or(CommandError::NoFallingPiece)?;
        if falling.position().y() >= BOARD_HEIGHT_I32 {
            return Err(CommandError::PieceCollision(PieceCollisionError));
        }
        self.falling_piece = Some(falling.moved(0, SOFT_DROP_ROWS));
        Ok(())
    }

    /// Returns a snapshot suitable for saving.
    ///
    /// The pause flag is not part of the snapshot; a restored session plays.
    #[must_use]
    pub fn to_saved(&self) -> SavedGame {
        let position = self
            .falling_piece
            .map_or(PiecePosition::SPAWN_POSITION, |piece| piece.position());
        SavedGame {
            board: board_to_rows(&self.board),
            current_piece: self.falling_piece.map(|piece| piece.piece().into()),
            next_piece: Some(self.piece_queue.peek_next().into()),
            current_x: position.x(),
            current_y: position.y(),
            score: self.stats.score(),
            level: self.stats.level(),
            elapsed_time: self.elapsed.as_secs_f64(),
        }
    }

    fn ensure_playing(&self) -> Result<(), CommandError> {
        if self.session_state.is_playing() {
            Ok(())
        } else {
            Err(CommandError::NotPlaying)
        }
    }

    fn try_update_falling_piece<F>(&mut self, f: F) -> Result<(), CommandError>
    where
        F: FnOnce(&FallingPiece) -> FallingPiece,
    {
        self.ensure_playing()?;
        let falling = self.falling_piece.ok_or(CommandError::NoFallingPiece)?;
        let updated = f(&falling);
        if self.board.is_colliding(&updated) {
            return Err(CommandError::PieceCollision(PieceCollisionError));
        }
        self.falling_piece = Some(updated);
        Ok(())
    }

    fn lock_piece(&mut self, piece: &FallingPiece) -> TickOutcome {
        self.board.fill_piece(piece);
        let cleared_lines = self.board.clear_lines();
        self.stats.complete_piece_drop(cleared_lines);
        match self.spawn_piece() {
            Ok(()) => TickOutcome::Locked { cleared_lines },
            Err(PieceCollisionError) => TickOutcome::GameOver,
        }
    }

    fn spawn_piece(&mut self) -> Result<(), PieceCollisionError> {
        let piece = FallingPiece::spawn(self.piece_queue.advance());
        self.falling_piece = Some(piece);
        if self.board.is_colliding(&piece) {
            self.session_state = SessionState::GameOver;
            return Err(PieceCollisionError);
        }
        Ok(())
    }
}

impl TryFrom<SavedGame> for GameSession {
    type Error = RestoreError;

    fn try_from(saved: SavedGame) -> Result<Self, Self::Error> {
        let board = board_from_rows(&saved.board)?;
        let position = PiecePosition::new(saved.current_x, saved.current_y);
        if saved.current_piece.is_some()
            && !(RESTORE_X_RANGE.contains(&position.x())
                && RESTORE_Y_RANGE.contains(&position.y()))
        {
            return Err(RestoreError::Position {
                x: position.x(),
                y: position.y(),
            });
        }
        let falling_piece = saved
            .current_piece
            .map(Piece::try_from)
            .transpose()?
            .map(|piece| FallingPiece::new(piece, position));
        let piece_queue = match saved.next_piece {
            Some(next) => PieceQueue::resume_with(Piece::try_from(next)?),
            None => PieceQueue::new(),
        };
        if !(1..=MAX_LEVEL).contains(&saved.level) {
            return Err(RestoreError::Level { level: saved.level });
        }
        let elapsed = Duration::try_from_secs_f64(saved.elapsed_time).map_err(|_| {
            RestoreError::ElapsedTime {
                seconds: saved.elapsed_time,
            }
        })?;
        Ok(Self {
            board,
            falling_piece,
            piece_queue,
            stats: GameStats::restored(saved.score, saved.level),
            session_state: SessionState::Playing,
            elapsed,
        })
    }
}
