use std::{ops::Deref, time::Duration};

use blockfall_engine::{CommandError, GameSession, TickOutcome};

use crate::{GameStore, HighScoreRecord, StoreError};

/// A game session bound to a store.
///
/// Every tick that changes the game overwrites the suspended game. When the
/// game ends, its score is appended to the ledger and the suspended game is
/// removed, so an ended game cannot be resumed.
///
/// Store failures never interrupt play; the most recent one is kept until
/// [`PersistentSession::take_store_error`] is called.
///
/// The inner session is reachable read-only through `Deref`; all mutation
/// goes through this wrapper so that nothing bypasses persistence.
#[derive(Debug)]
pub struct PersistentSession<S> {
    session: GameSession,
    store: S,
    store_error: Option<StoreError>,
}

impl<S> Deref for PersistentSession<S> {
    type Target = GameSession;

    fn deref(&self) -> &Self::Target {
        &self.session
    }
}

impl<S> PersistentSession<S>
where
    S: GameStore,
{
    /// Starts a new game. The suspended game, if any, is replaced on the first tick.
    #[must_use]
    pub fn new_game(store: S) -> Self {
        Self::with_session(GameSession::new(), store)
    }

    #[must_use]
    pub fn with_session(session: GameSession, store: S) -> Self {
        Self {
            session,
            store,
            store_error: None,
        }
    }

    /// Resumes the suspended game.
    ///
    /// Returns `None` when there is no suspended game or it cannot be loaded.
    #[must_use]
    pub fn resume(store: S) -> Option<Self> {
        let saved = store.load_game().ok().flatten()?;
        let session = GameSession::try_from(saved).ok()?;
        Some(Self::with_session(session, store))
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the most recent store failure, clearing it.
    pub fn take_store_error(&mut self) -> Option<StoreError> {
        self.store_error.take()
    }

    /// Applies one step of gravity, then saves or records the result.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.session.tick();
        match outcome {
            TickOutcome::Skipped => {}
            TickOutcome::GameOver => self.finish(),
            TickOutcome::Spawned | TickOutcome::Fell | TickOutcome::Locked { .. } => {
                let result = self.store.save_game(&self.session.to_saved());
                self.keep_error(result);
            }
        }
        outcome
    }

    /// Saves the game now, for leaving it to be resumed later.
    ///
    /// Does nothing once the game is over.
    pub fn suspend(&mut self) -> Result<(), StoreError> {
        if self.session.session_state().is_game_over() {
            return Ok(());
        }
        self.store.save_game(&self.session.to_saved())
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.session.try_move_left()
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.session.try_move_right()
    }

    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.session.try_rotate()
    }

    pub fn try_soft_drop(&mut self) -> Result<(), CommandError> {
        self.session.try_soft_drop()
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn advance_time(&mut self, dt: Duration) {
        self.session.advance_time(dt);
    }

    fn finish(&mut self) {
        let record = HighScoreRecord::now(self.session.stats().score());
        let result = self.store.append_high_score(record);
        self.keep_error(result);
        let result = self.store.delete_save();
        self.keep_error(result);
    }

    fn keep_error(&mut self, result: Result<(), StoreError>) {
        if let Err(e) = result {
            self.store_error = Some(e);
        }
    }
}
