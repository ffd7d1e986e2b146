//! Candidate guess ranking
//!
//! Scores a seeded sample of guesses by how well they split the current
//! answers and hands the search a short, best-first list.

use super::config::{Heuristic, SearchConfig};
use super::partition::{Partition, PartitionCache};
use crate::core::Word;
use rand::Rng;
use rand::seq::IndexedRandom;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::sync::Arc;

/// A scored candidate guess together with its partition of the answers
#[derive(Debug, Clone)]
pub struct RankedGuess<'a> {
    pub guess: &'a Word,
    pub partition: Arc<Partition<'a>>,
    /// `Σ size·log2(size)` over buckets
    pub information: f64,
    /// Largest bucket size
    pub largest: usize,
    /// Whether the guess is itself a remaining answer
    pub is_answer: bool,
}

impl<'a> RankedGuess<'a> {
    /// Score `guess` against `answers`
    #[must_use]
    pub fn score(
        guess: &'a Word,
        answers: &[&'a Word],
        cache: &PartitionCache<'a>,
        is_answer: bool,
    ) -> Self {
        let partition = cache.partition(guess, answers);
        Self {
            guess,
            information: partition.weighted_information(),
            largest: partition.largest(),
            partition,
            is_answer,
        }
    }

    /// Best-first ordering under `heuristic`
    ///
    /// Ties prefer remaining answers, then alphabetical order, so the ordering is
    /// total and independent of sampling order.
    #[must_use]
    pub fn compare(&self, other: &Self, heuristic: Heuristic) -> Ordering {
        let primary = match heuristic {
            Heuristic::WeightedInformation => self.information.total_cmp(&other.information),
            Heuristic::WorstCase => self
                .largest
                .cmp(&other.largest)
                .then_with(|| self.information.total_cmp(&other.information)),
        };
        primary
            .then_with(|| other.is_answer.cmp(&self.is_answer))
            .then_with(|| self.guess.cmp(other.guess))
    }
}

/// Draw the candidate guesses to score
///
/// All current answers (or `answer_sample_cap` of them) plus a
/// `guess_sample_fraction` share of the other guesses.
pub fn sample_candidates<'a, R: Rng + ?Sized>(
    guesses: &[&'a Word],
    answers: &[&'a Word],
    config: &SearchConfig,
    rng: &mut R,
) -> Vec<(&'a Word, bool)> {
    let mut sampled: Vec<(&'a Word, bool)> = if answers.len() <= config.answer_sample_cap {
        answers.iter().map(|&w| (w, true)).collect()
    } else {
        answers
            .choose_multiple(rng, config.answer_sample_cap)
            .map(|&w| (w, true))
            .collect()
    };

    let answer_set: FxHashSet<&Word> = answers.iter().copied().collect();
    let others: Vec<&'a Word> = guesses
        .iter()
        .copied()
        .filter(|w| !answer_set.contains(w))
        .collect();

    let fraction = config.guess_sample_fraction.clamp(0.0, 1.0);
    let amount = ((others.len() as f64) * fraction).ceil() as usize;
    if amount >= others.len() {
        sampled.extend(others.into_iter().map(|w| (w, false)));
    } else {
        sampled.extend(others.choose_multiple(rng, amount).map(|&w| (w, false)));
    }

    sampled
}

/// Rank candidate guesses for `answers`, best first
///
/// Guesses that separate nothing are dropped. The list is truncated to
/// `config.candidate_cap`. Given the same seed state the result is identical.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use wordle_tree::core::Word;
/// use wordle_tree::solver::{PartitionCache, SearchConfig, ranking::rank};
///
/// let pool: Vec<Word> = ["ab", "ba", "aa", "bb"].iter().map(|w| Word::new(*w).unwrap()).collect();
/// let refs: Vec<&Word> = pool.iter().collect();
/// let cache = PartitionCache::new(&pool, 1);
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let ranked = rank(&refs, &refs, &cache, &SearchConfig::default(), &mut rng);
/// assert_eq!(ranked[0].largest, 1); // "ab" and "ba" split all four apart
/// ```
pub fn rank<'a, R: Rng + ?Sized>(
    guesses: &[&'a Word],
    answers: &[&'a Word],
    cache: &PartitionCache<'a>,
    config: &SearchConfig,
    rng: &mut R,
) -> Vec<RankedGuess<'a>> {
    let candidates = sample_candidates(guesses, answers, config, rng);

    let mut ranked: Vec<RankedGuess<'a>> = candidates
        .into_par_iter()
        .map(|(guess, is_answer)| RankedGuess::score(guess, answers, cache, is_answer))
        .filter(|ranked| ranked.partition.makes_progress())
        .collect();

    ranked.sort_by(|a, b| a.compare(b, config.heuristic));
    ranked.truncate(config.candidate_cap);
    ranked
}
