//! Search configuration
//!
//! Every knob the engine reads lives here and is passed into a session
//! explicitly.

use std::fmt;
use std::str::FromStr;

/// Heuristic used to order candidate guesses before the search explores them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heuristic {
    /// Minimize `Σ size·log2(size)` over buckets
    #[default]
    WeightedInformation,
    /// Minimize the largest bucket, ties broken by weighted information
    WorstCase,
}

impl Heuristic {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::WeightedInformation => "information",
            Self::WorstCase => "worst-case",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "information" | "info" | "entropy" => Ok(Self::WeightedInformation),
            "worst-case" | "minimax" => Ok(Self::WorstCase),
            _ => Err(format!(
                "Unknown heuristic '{s}' (expected 'information' or 'worst-case')"
            )),
        }
    }
}

/// Configuration for one search session
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Restrict guesses to those consistent with revealed feedback
    pub hard_mode: bool,
    /// Exclusive upper bound on the total cost (sum of guesses over all answers)
    pub budget: u32,
    /// Maximum number of guesses for any single answer
    pub max_depth: u32,
    /// Guess ordering heuristic
    pub heuristic: Heuristic,
    /// At most this many current answers are scored as candidate guesses
    pub answer_sample_cap: usize,
    /// Fraction of the remaining guess pool sampled as candidate guesses
    pub guess_sample_fraction: f64,
    /// Ranked candidates explored per node
    pub candidate_cap: usize,
    /// Seed for candidate sampling
    pub seed: u64,
    /// Partitions with more buckets than this are ordered smallest first
    pub sort_threshold: usize,
    /// Stop scanning candidates once the incumbent meets the pool's lower bound
    pub stop_at_lower_bound: bool,
    /// Explore root candidates on the rayon thread pool
    pub parallel: bool,
    /// Force this word as the root guess
    pub opening: Option<String>,
}

impl SearchConfig {
    /// Budget value meaning "no limit on total cost"
    pub const UNBOUNDED: u32 = u32::MAX;

    /// Standard settings with the given depth limit
    #[must_use]
    pub fn with_depth(max_depth: u32) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            hard_mode: false,
            budget: Self::UNBOUNDED,
            max_depth: 6,
            heuristic: Heuristic::default(),
            answer_sample_cap: 200,
            guess_sample_fraction: 0.1,
            candidate_cap: 50,
            seed: 0,
            sort_threshold: 1,
            stop_at_lower_bound: true,
            parallel: false,
            opening: None,
        }
    }
}
