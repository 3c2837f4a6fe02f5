use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use blockfall_engine::SavedGame;
use serde::{Serialize, de::DeserializeOwned};

use crate::{HighScoreLedger, HighScoreRecord, StoreError};

/// Storage for the suspended game and the high-score ledger.
pub trait GameStore {
    /// Loads the suspended game. `Ok(None)` when there is none.
    fn load_game(&self) -> Result<Option<SavedGame>, StoreError>;

    /// Replaces the suspended game.
    fn save_game(&mut self, game: &SavedGame) -> Result<(), StoreError>;

    /// Removes the suspended game. Removing a missing game succeeds.
    fn delete_save(&mut self) -> Result<(), StoreError>;

    /// Returns whether a suspended game exists, without checking that it loads.
    fn has_save(&self) -> bool;

    /// Returns the ledger. A missing or unreadable ledger reads as empty.
    fn high_scores(&self) -> HighScoreLedger;

    /// Appends a finished game to the ledger.
    fn append_high_score(&mut self, record: HighScoreRecord) -> Result<(), StoreError>;
}

/// Keeps the suspended game and the ledger in two JSON files.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    save_path: PathBuf,
    ledger_path: PathBuf,
}

impl JsonFileStore {
    pub const DEFAULT_SAVE_FILE: &'static str = "tetris_save.json";
    pub const DEFAULT_LEDGER_FILE: &'static str = "tetris_highscores.json";

    #[must_use]
    pub fn new(save_path: impl Into<PathBuf>, ledger_path: impl Into<PathBuf>) -> Self {
        Self {
            save_path: save_path.into(),
            ledger_path: ledger_path.into(),
        }
    }

    /// Uses the default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(Self::DEFAULT_SAVE_FILE),
            dir.join(Self::DEFAULT_LEDGER_FILE),
        )
    }

    #[must_use]
    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    fn read_ledger(&self) -> Result<HighScoreLedger, StoreError> {
        Ok(read_json_file(&self.ledger_path)?.unwrap_or_default())
    }
}

impl GameStore for JsonFileStore {
    fn load_game(&self) -> Result<Option<SavedGame>, StoreError> {
        read_json_file(&self.save_path)
    }

    fn save_game(&mut self, game: &SavedGame) -> Result<(), StoreError> {
        write_json_file(&self.save_path, game)
    }

    fn delete_save(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.save_path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(StoreError::Io {
                path: self.save_path.clone(),
                source: e,
            }),
            _ => Ok(()),
        }
    }

    fn has_save(&self) -> bool {
        self.save_path.is_file()
    }

    fn high_scores(&self) -> HighScoreLedger {
        self.read_ledger().unwrap_or_default()
    }

    fn append_high_score(&mut self, record: HighScoreRecord) -> Result<(), StoreError> {
        // an unreadable ledger is replaced rather than blocking new records
        let mut ledger = self.read_ledger().unwrap_or_default();
        ledger.push(record);
        write_json_file(&self.ledger_path, &ledger)
    }
}

fn read_json_file<T>(path: &Path) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
{
    let io_error = |source| StoreError::Io {
        path: path.to_owned(),
        source,
    };
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(io_error(e)),
    };
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        StoreError::Json {
            path: path.to_owned(),
            source,
        }
    })?;
    Ok(Some(value))
}

fn write_json_file<T>(path: &Path, value: &T) -> Result<(), StoreError>
where
    T: Serialize,
{
    let io_error = |source| StoreError::Io {
        path: path.to_owned(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| io_error(e.into()))?;
    writeln!(writer).map_err(io_error)?;
    writer.flush().map_err(io_error)
}

/// Keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    saved_game: Option<SavedGame>,
    ledger: HighScoreLedger,
}

impl MemoryStore {
    #[must_use]
    pub fn with_saved_game(saved_game: SavedGame) -> Self {
        Self {
            saved_game: Some(saved_game),
            ledger: HighScoreLedger::default(),
        }
    }

    #[must_use]
    pub fn saved_game(&self) -> Option<&SavedGame> {
        self.saved_game.as_ref()
    }
}

impl GameStore for MemoryStore {
    fn load_game(&self) -> Result<Option<SavedGame>, StoreError> {
        Ok(self.saved_game.clone())
    }

    fn save_game(&mut self, game: &SavedGame) -> Result<(), StoreError> {
        self.saved_game = Some(game.clone());
        Ok(())
    }

    fn delete_save(&mut self) -> Result<(), StoreError> {
        self.saved_game = None;
        Ok(())
    }

    fn has_save(&self) -> bool {
        self.saved_game.is_some()
    }

    fn high_scores(&self) -> HighScoreLedger {
        self.ledger.clone()
    }

    fn append_high_score(&mut self, record: HighScoreRecord) -> Result<(), StoreError> {
        self.ledger.push(record);
        Ok(())
    }
}
