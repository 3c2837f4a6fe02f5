pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

/// Reason a player command was not applied.
///
/// Rejected commands leave the session untouched; front ends usually discard
/// this value.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CommandError {
    #[display("piece colliding after command")]
    PieceCollision(PieceCollisionError),
    #[display("session is paused or over")]
    NotPlaying,
    #[display("no falling piece")]
    NoFallingPiece,
}

/// Reason a [`SavedGame`] cannot be turned back into a [`GameSession`].
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RestoreError {
    #[display("board must have {} rows of {} cells", BOARD_HEIGHT, BOARD_WIDTH)]
    BoardDimensions,
    #[display("invalid cell value {value} at ({x}, {y})")]
    CellValue { x: usize, y: usize, value: u8 },
    #[display("invalid shape id {id}")]
    ShapeId { id: u8 },
    #[display("invalid color id {id}")]
    ColorId { id: u8 },
    #[display("invalid rotation {rotation}")]
    Rotation { rotation: u8 },
    #[display("falling piece position ({x}, {y}) is too far off the board")]
    Position { x: i32, y: i32 },
    #[display("level must be 1-{}, got {level}", MAX_LEVEL)]
    Level { level: usize },
    #[display("invalid elapsed time {seconds}")]
    ElapsedTime { seconds: f64 },
}
