use std::cell::RefCell;

use anyhow::Context as _;
use blockfall_engine::{GameSession, PieceSeed};
use blockfall_store::{GameStore as _, JsonFileStore, PersistentSession, StoreError};

use crate::tui::{Runtime, ScreenStack};

use self::screens::MenuScreen;

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Fix the piece sequence of new games (32 hex digits)
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
}

/// State shared by all screens of one `play` run.
#[derive(Debug)]
pub(crate) struct PlayContext {
    store: JsonFileStore,
    seed: Option<PieceSeed>,
    store_errors: RefCell<Vec<StoreError>>,
}

impl PlayContext {
    fn new(store: JsonFileStore, seed: Option<PieceSeed>) -> Self {
        Self {
            store,
            seed,
            store_errors: RefCell::new(vec![]),
        }
    }

    fn store(&self) -> &JsonFileStore {
        &self.store
    }

    fn new_game(&self) -> PersistentSession<JsonFileStore> {
        let session = self.seed.map_or_else(GameSession::new, GameSession::with_seed);
        PersistentSession::with_session(session, self.store.clone())
    }

    fn resume_game(&self) -> Option<PersistentSession<JsonFileStore>> {
        PersistentSession::resume(self.store.clone())
    }

    /// Keeps a store failure to be printed once the terminal is restored.
    fn report_store_error(&self, error: StoreError) {
        self.store_errors.borrow_mut().push(error);
    }

    fn store_error_count(&self) -> usize {
        self.store_errors.borrow().len()
    }
}

pub(crate) fn run(arg: &PlayArg, store: JsonFileStore) -> anyhow::Result<()> {
    eprintln!("Save file: {}", store.save_path().display());
    eprintln!("High scores: {}", store.ledger_path().display());

    let ctx = PlayContext::new(store, arg.seed);
    let mut screens = ScreenStack::new(Box::new(MenuScreen::new(&ctx)));
    let result = Runtime::new().run(&mut screens);
    drop(screens);

    let PlayContext {
        store,
        store_errors,
        ..
    } = ctx;
    for error in store_errors.into_inner() {
        eprintln!("warning: {:#}", anyhow::Error::from(error));
    }
    result.context("failed to run the terminal UI")?;

    if store.has_save() {
        eprintln!("Game suspended. Choose \"Resume Game\" to continue it.");
    }
    if let Some(best) = store.high_scores().top(1).next() {
        eprintln!("Best score: {}", best.score);
    }
    Ok(())
}
