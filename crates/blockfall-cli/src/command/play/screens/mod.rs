pub(super) use self::menu::MenuScreen;

mod game;
mod high_scores;
mod instructions;
mod menu;

#[cfg(test)]
mod test_util {
    use blockfall_engine::PieceSeed;
    use blockfall_store::JsonFileStore;
    use crossterm::event::{Event, KeyCode, KeyEvent};

    use crate::command::play::PlayContext;

    /// Context whose files live in a directory that does not exist, so
    /// every write fails and nothing touches the disk.
    pub(super) fn unwritable_context() -> PlayContext {
        let dir = std::env::temp_dir()
            .join("blockfall-cli-missing")
            .join("no-such-dir");
        PlayContext::new(JsonFileStore::in_dir(dir), Some(PieceSeed::from(3)))
    }

    pub(super) fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }
}
