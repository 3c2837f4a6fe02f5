use std::{fmt, mem, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;

use crate::Piece;

/// Produces the pieces to spawn, one ahead of the falling piece.
///
/// Every piece is drawn independently: shape and color are each uniform and
/// unrelated to one another. There is no bag, so the same shape may repeat any
/// number of times in a row.
///
/// # Example
///
/// ```
/// use blockfall_engine::engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
///
/// let preview = queue.peek_next();
/// assert_eq!(queue.advance(), preview);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    next: Piece,
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// The same seed produces the same sequence of pieces.
///
/// ```
/// use blockfall_engine::{PieceSeed, engine::PieceQueue};
///
/// let seed = PieceSeed::from(42);
/// let mut a = PieceQueue::with_seed(seed);
/// let mut b = PieceQueue::with_seed(seed);
/// for _ in 0..10 {
///     assert_eq!(a.advance(), b.advance());
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

/// Error returned when parsing a [`PieceSeed`] from a string.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParseSeedError {
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl From<u64> for PieceSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceQueue {
    /// Creates a queue with a random seed and a freshly drawn next piece.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let next = rng.random();
        Self { rng, next }
    }

    /// Creates a queue whose upcoming piece is `next`, as restored from a save.
    ///
    /// Pieces after `next` come from a random seed.
    #[must_use]
    pub fn resume_with(next: Piece) -> Self {
        let seed: PieceSeed = rand::rng().random();
        Self {
            rng: Pcg32::from_seed(seed.0),
            next,
        }
    }

    /// Returns the upcoming piece without consuming it.
    #[must_use]
    pub fn peek_next(&self) -> Piece {
        self.next
    }

    /// Returns the upcoming piece and draws a new one to replace it.
    pub fn advance(&mut self) -> Piece {
        let next = self.rng.random();
        mem::replace(&mut self.next, next)
    }
}
