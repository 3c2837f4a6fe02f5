//! Board geometry and piece definitions.

pub use self::{board::*, piece::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod shape;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) const PIECE_SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32 - 1;
pub(crate) const PIECE_SPAWN_Y: i32 = 0;
