use std::{fs, path::PathBuf};

use anyhow::Context as _;
use blockfall_store::JsonFileStore;
use clap::{Parser, Subcommand};

use self::{play::PlayArg, scores::ScoresArg};

mod play;
mod scores;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    storage: StorageArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

/// Where the suspended game and the high-score ledger are kept.
#[derive(Debug, Clone, clap::Args)]
struct StorageArg {
    /// Directory holding the save file and the high-score ledger
    #[clap(long, global = true, default_value = ".")]
    data_dir: PathBuf,
    /// File name of the suspended game, relative to the data directory
    #[clap(long, global = true, default_value = JsonFileStore::DEFAULT_SAVE_FILE)]
    save_file: PathBuf,
    /// File name of the high-score ledger, relative to the data directory
    #[clap(long, global = true, default_value = JsonFileStore::DEFAULT_LEDGER_FILE)]
    ledger_file: PathBuf,
}

impl StorageArg {
    fn open_store(&self) -> anyhow::Result<JsonFileStore> {
        fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "failed to create data directory {}",
                self.data_dir.display()
            )
        })?;
        Ok(JsonFileStore::new(
            self.data_dir.join(&self.save_file),
            self.data_dir.join(&self.ledger_file),
        ))
    }
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the high scores
    Scores(#[clap(flatten)] ScoresArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let store = args.storage.open_store()?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, store)?,
        Mode::Scores(arg) => scores::run(&arg, &store)?,
    }
    Ok(())
}
