//! Answer partitioning by feedback pattern
//!
//! A [`Partition`] groups a set of answers by the pattern one guess produces
//! against each of them. [`PartitionCache`] memoizes partitions of the full
//! answer pool for the lifetime of one search session and derives partitions of
//! large subsets by intersection.

use crate::core::{Pattern, Word};
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Subsets smaller than this are partitioned directly instead of being derived
/// from the memoized full-pool partition.
pub const DERIVE_THRESHOLD: usize = 64;

/// Answers sharing one feedback pattern
pub type Bucket<'a> = (Pattern, Vec<&'a Word>);

/// The buckets of an answer set under one guess
///
/// Buckets are pairwise disjoint, their union is exactly the input set, and
/// each pattern appears once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<'a> {
    buckets: Vec<Bucket<'a>>,
}

impl<'a> Partition<'a> {
    /// Partition `answers` by the pattern `guess` produces against each one
    ///
    /// Buckets are ordered by pattern, then by ascending size when there are
    /// more than `sort_threshold` of them.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::Word;
    /// use wordle_tree::solver::Partition;
    ///
    /// let answers: Vec<Word> = ["ab", "ba", "aa"].iter().map(|w| Word::new(*w).unwrap()).collect();
    /// let refs: Vec<&Word> = answers.iter().collect();
    ///
    /// let partition = Partition::compute(&answers[0], &refs, 1);
    /// assert_eq!(partition.len(), 3);
    /// assert_eq!(partition.total(), 3);
    /// ```
    #[must_use]
    pub fn compute(guess: &Word, answers: &[&'a Word], sort_threshold: usize) -> Self {
        let mut groups: FxHashMap<Pattern, Vec<&'a Word>> = FxHashMap::default();
        for &answer in answers {
            groups
                .entry(Pattern::calculate(guess, answer))
                .or_default()
                .push(answer);
        }

        Self::from_buckets(groups.into_iter().collect(), sort_threshold)
    }

    fn from_buckets(mut buckets: Vec<Bucket<'a>>, sort_threshold: usize) -> Self {
        buckets.sort_unstable_by_key(|(pattern, _)| *pattern);
        if buckets.len() > sort_threshold {
            // Stable: equal sizes stay in pattern order
            buckets.sort_by_key(|(_, words)| words.len());
        }
        Self { buckets }
    }

    #[inline]
    #[must_use]
    pub fn buckets(&self) -> &[Bucket<'a>] {
        &self.buckets
    }

    /// Number of buckets
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Number of answers across all buckets
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, words)| words.len()).sum()
    }

    /// Size of the largest bucket
    #[must_use]
    pub fn largest(&self) -> usize {
        self.buckets
            .iter()
            .map(|(_, words)| words.len())
            .max()
            .unwrap_or(0)
    }

    /// Whether the guess itself is one of the partitioned answers
    #[must_use]
    pub fn has_perfect(&self) -> bool {
        self.buckets.iter().any(|(pattern, _)| pattern.is_perfect())
    }

    /// `Σ size·log2(size)` over buckets; lower means a finer split
    ///
    /// Equals `total·(log2(total) − entropy)`, so ranking by it matches ranking
    /// by Shannon entropy for a fixed answer set.
    #[must_use]
    pub fn weighted_information(&self) -> f64 {
        self.buckets
            .iter()
            .map(|(_, words)| {
                let size = words.len() as f64;
                size * size.log2()
            })
            .sum()
    }

    /// Whether the guess separates anything at all
    #[must_use]
    pub fn makes_progress(&self) -> bool {
        self.buckets.len() > 1 || self.has_perfect()
    }

    /// Restrict to answers in `subset`, dropping emptied buckets
    fn intersect(&self, subset: &FxHashSet<&Word>, sort_threshold: usize) -> Self {
        let buckets = self
            .buckets
            .iter()
            .filter_map(|(pattern, words)| {
                let kept: Vec<&'a Word> = words
                    .iter()
                    .copied()
                    .filter(|w| subset.contains(w))
                    .collect();
                (!kept.is_empty()).then_some((*pattern, kept))
            })
            .collect();
        Self::from_buckets(buckets, sort_threshold)
    }
}

/// Counters describing how partitions were obtained
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Full-pool partitions served from the memo
    pub hits: u64,
    /// Full-pool partitions computed
    pub misses: u64,
    /// Subset partitions derived from a full-pool partition
    pub derived: u64,
    /// Subset partitions computed directly
    pub direct: u64,
}

type Slot<'a> = Arc<OnceLock<Arc<Partition<'a>>>>;

/// Session-scoped partition memo
///
/// Full-pool partitions are computed lazily, once per guess, and kept until the
/// cache is dropped. The cache is `Sync`: concurrent first requests for the
/// same guess wait on one computation.
pub struct PartitionCache<'a> {
    answers: Vec<&'a Word>,
    sort_threshold: usize,
    full: RwLock<FxHashMap<&'a Word, Slot<'a>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    derived: AtomicU64,
    direct: AtomicU64,
}

impl<'a> PartitionCache<'a> {
    /// Create an empty cache over the full answer pool
    #[must_use]
    pub fn new(answers: &'a [Word], sort_threshold: usize) -> Self {
        Self {
            answers: answers.iter().collect(),
            sort_threshold,
            full: RwLock::new(FxHashMap::default()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            derived: AtomicU64::new(0),
            direct: AtomicU64::new(0),
        }
    }

    /// Partition `subset` under `guess`
    ///
    /// `subset` must be drawn from the cache's answer pool. The full pool is
    /// served from the memo; large subsets are derived from it; small ones are
    /// computed directly.
    pub fn partition(&self, guess: &'a Word, subset: &[&'a Word]) -> Arc<Partition<'a>> {
        if subset.len() == self.answers.len() {
            return self.full_partition(guess);
        }

        if subset.len() < DERIVE_THRESHOLD {
            self.direct.fetch_add(1, Ordering::Relaxed);
            return Arc::new(Partition::compute(guess, subset, self.sort_threshold));
        }

        let full = self.full_partition(guess);
        self.derived.fetch_add(1, Ordering::Relaxed);
        let members: FxHashSet<&Word> = subset.iter().copied().collect();
        Arc::new(full.intersect(&members, self.sort_threshold))
    }

    /// Memoized partition of the full answer pool
    pub fn full_partition(&self, guess: &'a Word) -> Arc<Partition<'a>> {
        let existing = self
            .full
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(guess)
            .cloned();

        let slot = existing.unwrap_or_else(|| {
            self.full
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(guess)
                .or_default()
                .clone()
        });

        let mut computed = false;
        let partition = slot
            .get_or_init(|| {
                computed = true;
                Arc::new(Partition::compute(guess, &self.answers, self.sort_threshold))
            })
            .clone();

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }
        partition
    }

    /// Number of memoized full-pool partitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.full.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the session counters
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            derived: self.derived.load(Ordering::Relaxed),
            direct: self.direct.load(Ordering::Relaxed),
        }
    }
}
