//! Persistence for blockfall games.
//!
//! - [`GameStore`] - where the suspended game and the high-score ledger live
//! - [`JsonFileStore`] - the two JSON files on disk
//! - [`MemoryStore`] - an in-memory store
//! - [`HighScoreLedger`] - finished games, ranked on demand
//! - [`PersistentSession`] - a [`GameSession`](blockfall_engine::GameSession)
//!   that saves itself after every tick and records its score when it ends
//!
//! # Example
//!
//! ```
//! use blockfall_store::{GameStore as _, MemoryStore, PersistentSession};
//!
//! let mut session = PersistentSession::new_game(MemoryStore::default());
//! session.tick();
//! assert!(session.store().has_save());
//!
//! let resumed = PersistentSession::resume(session.store().clone()).unwrap();
//! assert_eq!(resumed.board(), session.board());
//! ```

use std::{io, path::PathBuf};

pub use self::{high_score::*, persistent_session::*, store::*};

mod high_score;
mod persistent_session;
mod store;

/// Failure to read or write one of the store's files.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to access {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
