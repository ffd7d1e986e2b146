//! Branch-and-bound decision tree search
//!
//! [`TreeSearch`] owns one search session: the pools, the configuration and the
//! partition cache. Each call to [`TreeSearch::solve`] is a pure function of
//! (guesses, answers, budget, depth, seed); the only shared state is the
//! append-only cache and the session counters.

use super::bounds::{BudgetLedger, min_guesses, min_total_cost};
use super::config::SearchConfig;
use super::hard_mode::filter_guesses;
use super::partition::{CacheStats, PartitionCache};
use super::ranking::{RankedGuess, rank};
use super::tree::GuessTree;
use crate::core::{Pattern, PoolError, Word, WordPool};
use log::{debug, info, trace};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use rustc_hash::{FxHashSet, FxHasher};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

/// A tree together with its total cost
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub cost: u32,
    pub tree: GuessTree,
}

/// Result of a search call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A tree costing strictly less than the budget and within the depth limit
    Solved(Solution),
    /// No explored guess produced a tree within the budget and depth limit
    Unsolvable,
}

impl SearchOutcome {
    /// Achieved total cost
    #[must_use]
    pub const fn cost(&self) -> Option<u32> {
        match self {
            Self::Solved(solution) => Some(solution.cost),
            Self::Unsolvable => None,
        }
    }

    /// The chosen root guess
    #[must_use]
    pub const fn guess(&self) -> Option<&Word> {
        match self {
            Self::Solved(solution) => Some(solution.tree.guess()),
            Self::Unsolvable => None,
        }
    }

    #[must_use]
    pub const fn tree(&self) -> Option<&GuessTree> {
        match self {
            Self::Solved(solution) => Some(&solution.tree),
            Self::Unsolvable => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            Self::Unsolvable => None,
        }
    }
}

impl From<Option<Solution>> for SearchOutcome {
    fn from(solution: Option<Solution>) -> Self {
        solution.map_or(Self::Unsolvable, Self::Solved)
    }
}

/// Error type for sessions that cannot be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    Pool(PoolError),
    UnknownOpening(String),
    AnswerNotGuessable(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(err) => write!(f, "Invalid word pools: {err}"),
            Self::UnknownOpening(word) => {
                write!(f, "Opening guess '{word}' is not in the guess pool")
            }
            Self::AnswerNotGuessable(word) => {
                write!(f, "Answer '{word}' is not in the guess pool")
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pool(err) => Some(err),
            Self::UnknownOpening(_) | Self::AnswerNotGuessable(_) => None,
        }
    }
}

impl From<PoolError> for SearchError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}

/// Counters describing the work one session did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Calls to `solve`
    pub nodes: u64,
    /// Candidate guesses whose buckets were explored
    pub candidates: u64,
    /// Candidates abandoned by budget or depth accounting
    pub pruned: u64,
    /// Calls cut off by a lower bound before ranking any guess
    pub infeasible: u64,
}

#[derive(Debug, Default)]
struct Counters {
    nodes: AtomicU64,
    candidates: AtomicU64,
    pruned: AtomicU64,
    infeasible: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SearchStats {
        SearchStats {
            nodes: self.nodes.load(Ordering::Relaxed),
            candidates: self.candidates.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            infeasible: self.infeasible.load(Ordering::Relaxed),
        }
    }
}

/// Either an immediate answer or the ranked guesses to explore
enum Frontier<'a> {
    Done(SearchOutcome),
    Explore {
        floor: u32,
        ranked: Vec<RankedGuess<'a>>,
    },
}

/// Deterministic seed for the `index`-th child of a call seeded with `seed`
///
/// Children never share a generator, so serial and parallel runs sample the
/// same candidates.
fn derive_seed(seed: u64, index: usize) -> u64 {
    let mut hasher = FxHasher::default();
    (seed, index).hash(&mut hasher);
    hasher.finish()
}

/// One search session
///
/// The partition cache lives exactly as long as the session.
pub struct TreeSearch<'a> {
    guesses: Vec<&'a Word>,
    answers: Vec<&'a Word>,
    word_len: usize,
    opening: Option<&'a Word>,
    config: SearchConfig,
    cache: PartitionCache<'a>,
    counters: Counters,
}

impl<'a> TreeSearch<'a> {
    /// Start a session over `guess_pool` and `answer_pool`
    ///
    /// # Errors
    /// Returns `SearchError` if the pools' word lengths differ, an answer is not
    /// in the guess pool, or the configured opening guess is not in the guess
    /// pool.
    pub fn new(
        guess_pool: &'a WordPool,
        answer_pool: &'a WordPool,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        if guess_pool.word_len() != answer_pool.word_len() {
            return Err(PoolError::MixedLengths {
                expected: answer_pool.word_len(),
                found: guess_pool.word_len(),
                word: guess_pool.words()[0].text().to_string(),
            }
            .into());
        }

        let guessable: FxHashSet<&Word> = guess_pool.words().iter().collect();
        if let Some(missing) = answer_pool.words().iter().find(|w| !guessable.contains(w)) {
            return Err(SearchError::AnswerNotGuessable(missing.text().to_string()));
        }

        let opening = config
            .opening
            .as_deref()
            .map(|text| {
                guess_pool
                    .find(text)
                    .ok_or_else(|| SearchError::UnknownOpening(text.to_string()))
            })
            .transpose()?;

        Ok(Self {
            guesses: guess_pool.words().iter().collect(),
            answers: answer_pool.words().iter().collect(),
            word_len: answer_pool.word_len(),
            opening,
            cache: PartitionCache::new(answer_pool.words(), config.sort_threshold),
            config,
            counters: Counters::default(),
        })
    }

    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.counters.snapshot()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of full-pool partitions memoized so far
    #[must_use]
    pub fn cached_partitions(&self) -> usize {
        self.cache.len()
    }

    /// Solve the full pools with the configured budget, depth and seed
    pub fn run(&self) -> SearchOutcome {
        let start = Instant::now();
        let SearchConfig {
            budget,
            max_depth,
            seed,
            ..
        } = self.config;

        info!(
            "searching {} answers with {} guesses (depth {max_depth}, heuristic {}, hard mode {})",
            self.answers.len(),
            self.guesses.len(),
            self.config.heuristic,
            self.config.hard_mode
        );

        let outcome = match self.opening {
            Some(opening) => self.evaluate_guess(opening, budget, max_depth, seed),
            None if self.config.parallel => self.solve_parallel(budget, max_depth, seed),
            None => self.solve(&self.guesses, &self.answers, budget, max_depth, seed),
        };

        let stats = self.stats();
        let cache = self.cache.stats();
        info!(
            "search finished in {:.2?}: cost {:?}, {} nodes, {} candidates, {} pruned, {} infeasible",
            start.elapsed(),
            outcome.cost(),
            stats.nodes,
            stats.candidates,
            stats.pruned,
            stats.infeasible
        );
        debug!(
            "partition cache: {} memoized, {} hits, {} derived, {} direct",
            cache.misses, cache.hits, cache.derived, cache.direct
        );
        outcome
    }

    /// Build a tree for the full answer pool that opens with `opening`
    pub fn evaluate_guess(
        &self,
        opening: &'a Word,
        budget: u32,
        max_depth: u32,
        seed: u64,
    ) -> SearchOutcome {
        if max_depth == 0 {
            return SearchOutcome::Unsolvable;
        }
        let is_answer = self.answers.contains(&opening);
        let candidate = RankedGuess::score(opening, &self.answers, &self.cache, is_answer);
        self.explore(&candidate, &self.guesses, &self.answers, budget, max_depth, seed)
            .into()
    }

    /// Find a tree for `answers` costing less than `budget` with at most
    /// `max_depth` guesses per answer
    ///
    /// `answers` must be drawn from the session's answer pool.
    pub fn solve(
        &self,
        guesses: &[&'a Word],
        answers: &[&'a Word],
        budget: u32,
        max_depth: u32,
        seed: u64,
    ) -> SearchOutcome {
        let (floor, ranked) = match self.frontier(guesses, answers, budget, max_depth, seed) {
            Frontier::Done(outcome) => return outcome,
            Frontier::Explore { floor, ranked } => (floor, ranked),
        };

        let mut best_cost = budget;
        let mut best: Option<Solution> = None;

        for (index, candidate) in ranked.iter().enumerate() {
            let child_seed = derive_seed(seed, index);
            let Some(solution) =
                self.explore(candidate, guesses, answers, best_cost, max_depth, child_seed)
            else {
                continue;
            };

            trace!(
                "{} answers: {} improves to {} (depth {max_depth})",
                answers.len(),
                candidate.guess,
                solution.cost
            );
            best_cost = solution.cost;
            best = Some(solution);

            if self.config.stop_at_lower_bound && best_cost <= floor {
                break;
            }
        }

        best.into()
    }

    /// Root search with candidates explored on the rayon pool
    ///
    /// Workers share one bound: each reads it before exploring and lowers it
    /// with `fetch_min`, so it never regresses. The cost matches the serial
    /// search; among equally cheap trees the chosen one may differ.
    fn solve_parallel(&self, budget: u32, max_depth: u32, seed: u64) -> SearchOutcome {
        let (floor, ranked) =
            match self.frontier(&self.guesses, &self.answers, budget, max_depth, seed) {
                Frontier::Done(outcome) => return outcome,
                Frontier::Explore { floor, ranked } => (floor, ranked),
            };

        let bound = AtomicU32::new(budget);
        let solutions: Vec<(usize, Solution)> = ranked
            .par_iter()
            .enumerate()
            .filter_map(|(index, candidate)| {
                let current = bound.load(Ordering::Acquire);
                if self.config.stop_at_lower_bound && current <= floor {
                    return None;
                }
                let solution = self.explore(
                    candidate,
                    &self.guesses,
                    &self.answers,
                    current,
                    max_depth,
                    derive_seed(seed, index),
                )?;
                bound.fetch_min(solution.cost, Ordering::AcqRel);
                debug!("{} reaches cost {}", candidate.guess, solution.cost);
                Some((index, solution))
            })
            .collect();

        solutions
            .into_iter()
            .min_by_key(|(index, solution)| (solution.cost, *index))
            .map(|(_, solution)| solution)
            .into()
    }

    /// Base cases, lower-bound cut-offs and candidate ranking
    fn frontier(
        &self,
        guesses: &[&'a Word],
        answers: &[&'a Word],
        budget: u32,
        max_depth: u32,
        seed: u64,
    ) -> Frontier<'a> {
        Counters::bump(&self.counters.nodes);
        debug_assert!(!answers.is_empty(), "search over an empty answer set");

        if max_depth == 0 {
            return Frontier::Done(SearchOutcome::Unsolvable);
        }

        if let [answer] = answers {
            return Frontier::Done(SearchOutcome::Solved(Solution {
                cost: 1,
                tree: GuessTree::Leaf((*answer).clone()),
            }));
        }

        let floor = (min_guesses(answers.len(), self.word_len) <= max_depth)
            .then(|| min_total_cost(answers.len(), self.word_len, max_depth))
            .flatten()
            .filter(|&floor| floor < budget);
        let Some(floor) = floor else {
            Counters::bump(&self.counters.infeasible);
            return Frontier::Done(SearchOutcome::Unsolvable);
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let ranked = rank(guesses, answers, &self.cache, &self.config, &mut rng);
        Frontier::Explore { floor, ranked }
    }

    /// Solve every bucket of one candidate guess under `budget`
    ///
    /// Returns `None` as soon as the guess cannot beat `budget`.
    fn explore(
        &self,
        candidate: &RankedGuess<'a>,
        guesses: &[&'a Word],
        answers: &[&'a Word],
        budget: u32,
        max_depth: u32,
        seed: u64,
    ) -> Option<Solution> {
        Counters::bump(&self.counters.candidates);
        let guess = candidate.guess;
        let child_depth = max_depth - 1;

        let open: Vec<(Pattern, &[&'a Word], u32)> = candidate
            .partition
            .buckets()
            .iter()
            .filter(|(pattern, _)| !pattern.is_perfect())
            .map(|(pattern, bucket)| {
                min_total_cost(bucket.len(), self.word_len, child_depth)
                    .map(|bound| (*pattern, bucket.as_slice(), bound))
            })
            .collect::<Option<_>>()
            .or_else(|| {
                Counters::bump(&self.counters.pruned);
                None
            })?;

        let bounds: Vec<u32> = open.iter().map(|&(_, _, bound)| bound).collect();
        let Some(mut ledger) = BudgetLedger::open(budget, answers.len(), &bounds) else {
            Counters::bump(&self.counters.pruned);
            return None;
        };

        let mut branches = BTreeMap::new();
        if candidate.partition.has_perfect() {
            branches.insert(Pattern::perfect(self.word_len), GuessTree::Leaf(guess.clone()));
        }

        for (index, (pattern, bucket, bound)) in open.into_iter().enumerate() {
            let Some(child_budget) = ledger.allot(bound) else {
                Counters::bump(&self.counters.pruned);
                return None;
            };

            let child_guesses = if self.config.hard_mode {
                Cow::Owned(filter_guesses(guesses, guess, pattern))
            } else {
                Cow::Borrowed(guesses)
            };

            match self.solve(
                &child_guesses,
                bucket,
                child_budget,
                child_depth,
                derive_seed(seed, index),
            ) {
                SearchOutcome::Solved(sub) => {
                    ledger.commit(sub.cost);
                    branches.insert(pattern, sub.tree);
                }
                SearchOutcome::Unsolvable => {
                    Counters::bump(&self.counters.pruned);
                    return None;
                }
            }
        }

        Some(Solution {
            cost: ledger.finish(),
            tree: GuessTree::Node {
                guess: guess.clone(),
                branches,
            },
        })
    }
}

/// Run one session over `guess_pool` and `answer_pool`
///
/// # Errors
/// Returns `SearchError` if the session cannot be started (see [`TreeSearch::new`]).
///
/// # Examples
/// ```
/// use wordle_tree::core::{Word, WordPool};
/// use wordle_tree::solver::{SearchConfig, solve};
///
/// let pool = WordPool::new(["ab", "ba", "aa", "bb"].map(|w| Word::new(w).unwrap())).unwrap();
/// let outcome = solve(&pool, &pool, SearchConfig::with_depth(2)).unwrap();
///
/// assert_eq!(outcome.cost(), Some(7));
/// ```
pub fn solve(
    guess_pool: &WordPool,
    answer_pool: &WordPool,
    config: SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    Ok(TreeSearch::new(guess_pool, answer_pool, config)?.run())
}
