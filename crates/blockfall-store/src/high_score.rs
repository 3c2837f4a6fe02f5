use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score of a finished game and when it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub score: usize,
    /// Stored as unix seconds.
    #[serde(with = "unix_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl HighScoreRecord {
    #[must_use]
    pub fn new(score: usize, timestamp: DateTime<Utc>) -> Self {
        Self { score, timestamp }
    }

    /// Creates a record for a game ending now.
    #[must_use]
    pub fn now(score: usize) -> Self {
        Self::new(score, Utc::now())
    }
}

/// Append-only list of finished games, in the order they ended.
///
/// Duplicate scores are kept.
///
/// ```
/// use blockfall_store::{HighScoreLedger, HighScoreRecord};
///
/// let mut ledger = HighScoreLedger::default();
/// for score in [300, 1200, 300, 800] {
///     ledger.push(HighScoreRecord::now(score));
/// }
///
/// let top: Vec<_> = ledger.top(3).map(|record| record.score).collect();
/// assert_eq!(top, [1200, 800, 300]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreLedger {
    records: Vec<HighScoreRecord>,
}

impl From<Vec<HighScoreRecord>> for HighScoreLedger {
    fn from(records: Vec<HighScoreRecord>) -> Self {
        Self { records }
    }
}

impl HighScoreLedger {
    #[must_use]
    pub fn records(&self) -> &[HighScoreRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: HighScoreRecord) {
        self.records.push(record);
    }

    /// Returns the `n` best records, highest score first.
    ///
    /// Records with equal scores keep their ledger order.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &HighScoreRecord> {
        let mut ranked: Vec<_> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.into_iter().take(n)
    }
}

/// Writes whole seconds; reads whole or fractional seconds.
mod unix_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize as _, Deserializer, de::Error as _};

    pub(super) use chrono::serde::ts_seconds::serialize;

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = f64::deserialize(deserializer)?;
        from_fractional_seconds(seconds)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {seconds}")))
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_fractional_seconds(seconds: f64) -> Option<DateTime<Utc>> {
        if !seconds.is_finite() {
            return None;
        }
        let whole = seconds.floor();
        let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }
}
