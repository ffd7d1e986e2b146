//! Admissible lower bounds and per-bucket budget accounting
//!
//! Costs count guesses summed over answers. A budget is exclusive: a search
//! under budget `b` must return a tree costing strictly less than `b`.
//!
//! For a guess splitting `n` answers into buckets, the tree costs
//! `n + Σ sub_i`, where `sub_i` is the cost of the subtree solving bucket `i`
//! (zero for the all-Hit bucket). Every bucket still to be solved needs at
//! least its lower bound, so a bucket may only be given what is left after
//! reserving those bounds for the buckets after it.

use crate::core::pattern_count;

/// Fewest guesses that can guarantee solving `answers` words of `word_len`
/// letters: `ceil(log_{3^L}(answers)) + 1`.
///
/// # Examples
/// ```
/// use wordle_tree::solver::bounds::min_guesses;
///
/// assert_eq!(min_guesses(1, 5), 1);
/// assert_eq!(min_guesses(243, 5), 2);
/// assert_eq!(min_guesses(244, 5), 3);
/// ```
#[must_use]
pub fn min_guesses(answers: usize, word_len: usize) -> u32 {
    let patterns = u64::from(pattern_count(word_len));
    let mut capacity = 1u64;
    let mut guesses = 1;
    while capacity < answers as u64 {
        capacity = capacity.saturating_mul(patterns);
        guesses += 1;
    }
    guesses
}

/// Lowest total cost any tree of depth at most `max_depth` can reach for
/// `answers` words, or `None` if no such tree can exist.
///
/// At guess `d` at most `(3^L − 1)^(d−1)` answers can be hit: one per node, and
/// every node has at most `3^L − 1` non-perfect children. Filling the shallowest
/// levels first gives the bound.
#[must_use]
pub fn min_total_cost(answers: usize, word_len: usize, max_depth: u32) -> Option<u32> {
    let branching = u64::from(pattern_count(word_len)) - 1;
    let mut remaining = answers as u64;
    let mut level_capacity = 1u64;
    let mut cost = 0u64;

    for depth in 1..=u64::from(max_depth) {
        if remaining == 0 {
            break;
        }
        let placed = remaining.min(level_capacity);
        cost += placed * depth;
        remaining -= placed;
        level_capacity = level_capacity.saturating_mul(branching);
    }

    if remaining > 0 {
        return None;
    }
    Some(u32::try_from(cost).unwrap_or(u32::MAX))
}

/// Tracks the budget of one candidate guess while its buckets are solved
///
/// Opened with the answer count and the lower bounds of every non-perfect
/// bucket; each bucket is then allotted a child budget and committed with its
/// actual sub-cost, in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetLedger {
    budget: u64,
    committed: u64,
    reserve: u64,
    allotted: Option<u64>,
}

impl BudgetLedger {
    /// Start accounting for a guess over `answers` words
    ///
    /// Returns `None` when even the lower bounds cannot fit under `budget`.
    #[must_use]
    pub fn open(budget: u32, answers: usize, lower_bounds: &[u32]) -> Option<Self> {
        let committed = answers as u64;
        let reserve = lower_bounds.iter().map(|&b| u64::from(b)).sum();
        let ledger = Self {
            budget: u64::from(budget),
            committed,
            reserve,
            allotted: None,
        };
        (committed + reserve < ledger.budget).then_some(ledger)
    }

    /// Budget left after what is already committed
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.budget - self.committed
    }

    /// Allot an exclusive child budget to the next bucket
    ///
    /// Returns `None` if the bucket's own lower bound does not fit, in which case
    /// the guess should be abandoned.
    ///
    /// # Panics
    /// Panics if the child budget would exceed the remaining budget, or if a
    /// previous allotment was never committed. Both are accounting bugs.
    pub fn allot(&mut self, lower_bound: u32) -> Option<u32> {
        assert!(
            self.allotted.is_none(),
            "budget allotted twice without a commit"
        );
        let lower_bound = u64::from(lower_bound);
        assert!(
            lower_bound <= self.reserve,
            "bucket lower bound {lower_bound} was not reserved ({} left)",
            self.reserve
        );
        self.reserve -= lower_bound;

        let child = self.budget - self.committed - self.reserve;
        assert!(
            child <= self.remaining(),
            "child budget {child} exceeds remaining budget {}",
            self.remaining()
        );

        if child <= lower_bound {
            return None;
        }
        self.allotted = Some(child);
        Some(u32::try_from(child).unwrap_or(u32::MAX))
    }

    /// Record the cost a bucket's subtree actually reached
    ///
    /// # Panics
    /// Panics if nothing was allotted or the cost is not below the allotment.
    pub fn commit(&mut self, cost: u32) {
        let allotted = self
            .allotted
            .take()
            .unwrap_or_else(|| panic!("commit of cost {cost} without an allotment"));
        let cost = u64::from(cost);
        assert!(
            cost < allotted,
            "subtree cost {cost} does not fit its budget {allotted}"
        );
        self.committed += cost;
        debug_assert!(self.committed + self.reserve < self.budget);
    }

    /// Total cost once every bucket is committed
    ///
    /// # Panics
    /// Panics if buckets are still reserved or allotted.
    #[must_use]
    pub fn finish(self) -> u32 {
        assert!(
            self.reserve == 0 && self.allotted.is_none(),
            "ledger finished with unsolved buckets"
        );
        u32::try_from(self.committed).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_guesses_matches_formula() {
        assert_eq!(min_guesses(1, 2), 1);
        assert_eq!(min_guesses(2, 2), 2);
        assert_eq!(min_guesses(9, 2), 2);
        assert_eq!(min_guesses(10, 2), 3);
        assert_eq!(min_guesses(81, 2), 3);
        assert_eq!(min_guesses(82, 2), 4);
        assert_eq!(min_guesses(2315, 5), 3);
    }

    #[test]
    fn min_total_cost_small_pools() {
        // 9 patterns for two letters: 1 hit at guess 1, 8 at guess 2, then 64
        assert_eq!(min_total_cost(1, 2, 6), Some(1));
        assert_eq!(min_total_cost(4, 2, 6), Some(7));
        assert_eq!(min_total_cost(9, 2, 6), Some(17));
        assert_eq!(min_total_cost(10, 2, 6), Some(20));
        assert_eq!(min_total_cost(0, 2, 6), Some(0));
    }

    #[test]
    fn min_total_cost_respects_depth() {
        assert_eq!(min_total_cost(9, 2, 2), Some(17));
        assert_eq!(min_total_cost(10, 2, 2), None);
        assert_eq!(min_total_cost(2, 2, 1), None);
        assert_eq!(min_total_cost(1, 2, 0), None);
    }

    #[test]
    fn min_total_cost_agrees_with_min_guesses() {
        for word_len in 1..=3 {
            for answers in 1..400 {
                let depth = min_guesses(answers, word_len);
                assert!(
                    min_total_cost(answers, word_len, depth - 1).is_none(),
                    "{answers} answers fit in fewer than {depth} guesses"
                );
            }
        }
    }

    #[test]
    fn min_total_cost_is_monotone() {
        for answers in 1..200 {
            let smaller = min_total_cost(answers, 2, 6).unwrap();
            let larger = min_total_cost(answers + 1, 2, 6).unwrap();
            assert!(larger > smaller);
            // Every answer costs at least one guess, all but one at least two
            assert!(smaller as usize >= 2 * answers - 1);
        }
    }

    #[test]
    fn ledger_rejects_when_bounds_do_not_fit() {
        // 4 answers, three singleton buckets: 4 + 3 = 7, needs budget 8
        assert!(BudgetLedger::open(7, 4, &[1, 1, 1]).is_none());
        assert!(BudgetLedger::open(8, 4, &[1, 1, 1]).is_some());
    }

    #[test]
    fn ledger_tight_budget_allows_only_lower_bounds() {
        let mut ledger = BudgetLedger::open(8, 4, &[1, 1, 1]).unwrap();
        for _ in 0..3 {
            let child = ledger.allot(1).unwrap();
            assert_eq!(child, 2);
            ledger.commit(1);
        }
        assert_eq!(ledger.finish(), 7);
    }

    #[test]
    fn ledger_carries_unused_budget_forward() {
        let mut ledger = BudgetLedger::open(12, 4, &[1, 3]).unwrap();
        let first = ledger.allot(1).unwrap();
        assert_eq!(first, 12 - 4 - 3);
        ledger.commit(4);
        // 12 - 8 = 4 left for a bucket needing at least 3
        assert_eq!(ledger.allot(3), Some(4));
    }

    #[test]
    #[should_panic(expected = "does not fit its budget")]
    fn ledger_panics_on_overspent_commit() {
        let mut ledger = BudgetLedger::open(20, 4, &[1, 3]).unwrap();
        let child = ledger.allot(1).unwrap();
        ledger.commit(child);
    }

    #[test]
    #[should_panic(expected = "allotted twice")]
    fn ledger_panics_on_double_allot() {
        let mut ledger = BudgetLedger::open(20, 4, &[1, 3]).unwrap();
        let _ = ledger.allot(1);
        let _ = ledger.allot(3);
    }

    /// Drive the ledger through every bucket ordering of every small size
    /// vector, committing every admissible cost, and check that no child is
    /// ever promised more than the parent has left and that totals stay under
    /// budget.
    #[test]
    fn ledger_invariants_exhaustive() {
        fn walk(ledger: BudgetLedger, bounds: &[u32], budget: u32, checked: &mut usize) {
            let Some((&bound, rest)) = bounds.split_first() else {
                let total = ledger.finish();
                assert!(total < budget, "total {total} reached budget {budget}");
                *checked += 1;
                return;
            };

            let mut next = ledger;
            let remaining = next.remaining();
            let reserve_after: u64 = rest.iter().map(|&b| u64::from(b)).sum();
            match next.allot(bound) {
                None => {
                    // Rejection only when the bucket truly cannot fit
                    assert!(remaining <= u64::from(bound) + reserve_after);
                }
                Some(child) => {
                    assert!(u64::from(child) <= remaining);
                    assert_eq!(u64::from(child), remaining - reserve_after);
                    for cost in bound..child {
                        let mut branch = next;
                        branch.commit(cost);
                        walk(branch, rest, budget, checked);
                    }
                }
            }
        }

        let word_len = 2;
        let mut checked = 0;
        for a in 1..=4usize {
            for b in 1..=4usize {
                for c in 0..=3usize {
                    let sizes: Vec<usize> = [a, b, c].into_iter().filter(|&s| s > 0).collect();
                    let answers: usize = sizes.iter().sum();
                    let bounds: Vec<u32> = sizes
                        .iter()
                        .map(|&s| min_total_cost(s, word_len, 5).unwrap())
                        .collect();
                    for budget in 1..=30 {
                        if let Some(ledger) = BudgetLedger::open(budget, answers, &bounds) {
                            walk(ledger, &bounds, budget, &mut checked);
                        } else {
                            let floor = answers as u32 + bounds.iter().sum::<u32>();
                            assert!(floor >= budget);
                        }
                    }
                }
            }
        }
        assert!(checked > 1000);
    }
}
