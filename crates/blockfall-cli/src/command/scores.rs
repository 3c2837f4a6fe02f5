use std::io::{self, Write as _};

use anyhow::Context as _;
use blockfall_store::{GameStore as _, HighScoreRecord, JsonFileStore};
use chrono::Local;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoresArg {
    /// Number of records to print
    #[clap(long, default_value_t = 10)]
    limit: usize,
    /// Print the records as JSON
    #[clap(long)]
    json: bool,
}

pub(crate) fn run(arg: &ScoresArg, store: &JsonFileStore) -> anyhow::Result<()> {
    let ScoresArg { limit, json } = arg;

    let ledger = store.high_scores();
    let records = ledger.top(*limit).copied().collect::<Vec<_>>();

    let mut stdout = io::stdout().lock();
    if *json {
        serde_json::to_writer_pretty(&mut stdout, &records)
            .context("failed to write high scores")?;
        writeln!(stdout)?;
    } else if records.is_empty() {
        eprintln!("No high scores in {}", store.ledger_path().display());
    } else {
        for line in format_table(&records) {
            writeln!(stdout, "{line}")?;
        }
    }
    Ok(())
}

fn format_table(records: &[HighScoreRecord]) -> Vec<String> {
    let mut lines = vec![format!("{:>4}  {:>8}  {}", "RANK", "SCORE", "DATE")];
    lines.extend(records.iter().enumerate().map(|(i, record)| {
        let date = record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        format!("{:>4}  {:>8}  {date}", i + 1, record.score)
    }));
    lines
}
