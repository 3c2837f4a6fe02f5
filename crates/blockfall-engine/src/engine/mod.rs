//! Game rules on top of the core geometry.
//!
//! - [`GameSession`] - one game: gravity ticks, player commands, pause and game over
//! - [`GameStats`] - score, level and line clear counters
//! - [`PieceQueue`] - the upcoming piece, drawn from a seedable generator
//! - [`SavedGame`] - serializable snapshot used to suspend and resume a session
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`]; the first piece spawns immediately
//! 2. Call [`GameSession::tick`] every [`GameSession::tick_interval`]
//! 3. Forward player input to the `try_*` commands
//! 4. A piece that cannot fall any further locks, full rows are cleared and
//!    the next piece spawns
//! 5. The game ends when a new piece collides at its spawn position

pub use self::{game_session::*, game_stats::*, piece_queue::*, saved_game::*};

mod game_session;
mod game_stats;
mod piece_queue;
mod saved_game;
