use std::time::Duration;

/// Base points for line clears, indexed by the number of lines cleared at once.
///
/// The base is multiplied by the level at the time of the clear.
pub const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Highest reachable level.
pub const MAX_LEVEL: usize = 10;

/// Points needed for each level after the first.
pub const SCORE_PER_LEVEL: usize = 2000;

const BASE_TICK_MILLIS: u64 = 500;
const TICK_MILLIS_PER_LEVEL: u64 = 50;
const MIN_TICK_MILLIS: u64 = 100;

/// Returns the level reached with `score` points: one level per 2000 points,
/// starting at 1 and capped at [`MAX_LEVEL`].
///
/// ```
/// use blockfall_engine::level_for_score;
///
/// assert_eq!(level_for_score(1999), 1);
/// assert_eq!(level_for_score(2000), 2);
/// assert_eq!(level_for_score(18000), 10);
/// assert_eq!(level_for_score(1_000_000), 10);
/// ```
#[must_use]
pub fn level_for_score(score: usize) -> usize {
    usize::min(MAX_LEVEL, score / SCORE_PER_LEVEL + 1)
}

/// Returns the gravity interval at `level`: 500ms at level 1, 50ms faster per
/// level, never below 100ms.
#[must_use]
pub fn tick_interval(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let millis = BASE_TICK_MILLIS
        .saturating_sub(steps.saturating_mul(TICK_MILLIS_PER_LEVEL))
        .max(MIN_TICK_MILLIS);
    Duration::from_millis(millis)
}

/// Game statistics tracking score, level, and line clears.
///
/// - **Score**: base points of each line clear times the level at that moment
/// - **Level**: recomputed from the score after every scoring lock
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of single, double, triple, quad line clears
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a new tracker at level 1 with all counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self::restored(0, 1)
    }

    /// Creates a tracker resuming from a saved score and level.
    ///
    /// Counters other than score and level are not saved and restart at zero.
    #[must_use]
    pub const fn restored(score: usize, level: usize) -> Self {
        Self {
            score,
            level,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by number of cleared lines (`[0]` counts
    /// locks that cleared nothing).
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Returns the gravity interval for the current level.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        tick_interval(self.level)
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` rows.
    ///
    /// Score and level only change when at least one row was cleared. The
    /// score saturates instead of overflowing.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        let index = usize::min(cleared_lines, SCORE_TABLE.len() - 1);
        self.line_cleared_counter[index] += 1;
        if cleared_lines == 0 {
            return;
        }
        self.score = self
            .score
            .saturating_add(SCORE_TABLE[index].saturating_mul(self.level));
        self.level = level_for_score(self.score);
    }
}
