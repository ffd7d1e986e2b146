//! Tree solving command
//!
//! Runs one search session over the loaded pools and reports what it found.

use crate::core::WordPool;
use crate::solver::{CacheStats, SearchConfig, SearchError, SearchOutcome, SearchStats, TreeSearch};
use std::time::{Duration, Instant};

/// Result of a search session
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub cache: CacheStats,
    pub duration: Duration,
    pub answers: usize,
    pub guesses: usize,
    pub max_depth: u32,
}

impl SolveReport {
    /// Mean guesses per answer, if a tree was found
    #[must_use]
    pub fn average_guesses(&self) -> Option<f64> {
        self.outcome
            .cost()
            .map(|cost| f64::from(cost) / self.answers as f64)
    }
}

/// Search for a guessing tree over `answer_pool` using guesses from `guess_pool`
///
/// # Errors
///
/// Returns `SearchError` if:
/// - The pools have different word lengths
/// - `config.opening` is not in the guess pool
pub fn run_search(
    guess_pool: &WordPool,
    answer_pool: &WordPool,
    config: SearchConfig,
) -> Result<SolveReport, SearchError> {
    let max_depth = config.max_depth;
    let search = TreeSearch::new(guess_pool, answer_pool, config)?;

    let start = Instant::now();
    let outcome = search.run();

    Ok(SolveReport {
        outcome,
        stats: search.stats(),
        cache: search.cache_stats(),
        duration: start.elapsed(),
        answers: answer_pool.len(),
        guesses: guess_pool.len(),
        max_depth,
    })
}
