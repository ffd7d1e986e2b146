//! Guess decision trees
//!
//! The result of a successful search: one guess per level, branching on the
//! observed feedback.

use crate::core::{Pattern, Word};
use std::collections::BTreeMap;

/// A guessing strategy for a set of answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessTree {
    /// A single remaining answer: guess it
    Leaf(Word),
    /// Guess `guess`, then follow the branch for the observed pattern
    Node {
        guess: Word,
        branches: BTreeMap<Pattern, GuessTree>,
    },
}

impl GuessTree {
    /// The word to guess at this level
    #[must_use]
    pub const fn guess(&self) -> &Word {
        match self {
            Self::Leaf(word) | Self::Node { guess: word, .. } => word,
        }
    }

    /// Number of answers this tree resolves
    #[must_use]
    pub fn answer_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { branches, .. } => branches.values().map(Self::answer_count).sum(),
        }
    }

    /// Total guesses needed, summed over every answer the tree resolves
    ///
    /// # Examples
    /// ```
    /// use std::collections::BTreeMap;
    /// use wordle_tree::core::{Pattern, Word};
    /// use wordle_tree::solver::GuessTree;
    ///
    /// let ab = Word::new("ab").unwrap();
    /// let ba = Word::new("ba").unwrap();
    /// let tree = GuessTree::Node {
    ///     guess: ab.clone(),
    ///     branches: BTreeMap::from([
    ///         (Pattern::calculate(&ab, &ab), GuessTree::Leaf(ab.clone())),
    ///         (Pattern::calculate(&ab, &ba), GuessTree::Leaf(ba.clone())),
    ///     ]),
    /// };
    ///
    /// assert_eq!(tree.cost(), 3); // "ab" in one guess, "ba" in two
    /// assert_eq!(tree.depth(), 2);
    /// ```
    #[must_use]
    pub fn cost(&self) -> u32 {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { branches, .. } => branches
                .iter()
                .map(|(pattern, branch)| {
                    if pattern.is_perfect() {
                        1
                    } else {
                        branch.answer_count() as u32 + branch.cost()
                    }
                })
                .sum(),
        }
    }

    /// Most guesses needed for any answer
    #[must_use]
    pub fn depth(&self) -> u32 {
        match self {
            Self::Leaf(_) => 1,
            Self::Node { branches, .. } => branches
                .iter()
                .map(|(pattern, branch)| {
                    if pattern.is_perfect() {
                        1
                    } else {
                        1 + branch.depth()
                    }
                })
                .max()
                .unwrap_or(1),
        }
    }

    /// Play the tree against `secret`, returning every guess made
    ///
    /// Returns `None` if the tree has no branch for an observed pattern or ends
    /// on a different word, i.e. `secret` is not one of its answers.
    #[must_use]
    pub fn play(&self, secret: &Word) -> Option<Vec<&Word>> {
        let mut guesses = Vec::new();
        let mut node = self;
        loop {
            match node {
                Self::Leaf(word) => {
                    guesses.push(word);
                    return (word == secret).then_some(guesses);
                }
                Self::Node { guess, branches } => {
                    guesses.push(guess);
                    let pattern = Pattern::calculate(guess, secret);
                    if pattern.is_perfect() {
                        return Some(guesses);
                    }
                    node = branches.get(&pattern)?;
                }
            }
        }
    }

    /// Every answer the tree resolves, in branch order
    #[must_use]
    pub fn answers(&self) -> Vec<&Word> {
        let mut answers = Vec::new();
        self.collect_answers(&mut answers);
        answers
    }

    fn collect_answers<'t>(&'t self, out: &mut Vec<&'t Word>) {
        match self {
            Self::Leaf(word) => out.push(word),
            Self::Node { branches, .. } => {
                for branch in branches.values() {
                    branch.collect_answers(out);
                }
            }
        }
    }

    /// Number of answers solved in exactly `n` guesses, for `n` in `1..=depth`
    #[must_use]
    pub fn depth_histogram(&self) -> BTreeMap<u32, usize> {
        let mut histogram = BTreeMap::new();
        self.fill_histogram(1, &mut histogram);
        histogram
    }

    fn fill_histogram(&self, level: u32, histogram: &mut BTreeMap<u32, usize>) {
        match self {
            Self::Leaf(_) => *histogram.entry(level).or_insert(0) += 1,
            Self::Node { branches, .. } => {
                for (pattern, branch) in branches {
                    if pattern.is_perfect() {
                        *histogram.entry(level).or_insert(0) += 1;
                    } else {
                        branch.fill_histogram(level + 1, histogram);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    /// "ab" splits {ab, ba, aa, bb} perfectly
    fn perfect_split() -> GuessTree {
        let guess = word("ab");
        let branches = ["ab", "ba", "aa", "bb"]
            .iter()
            .map(|w| {
                let answer = word(w);
                (Pattern::calculate(&guess, &answer), GuessTree::Leaf(answer))
            })
            .collect();
        GuessTree::Node { guess, branches }
    }

    #[test]
    fn leaf_costs_one() {
        let leaf = GuessTree::Leaf(word("ab"));
        assert_eq!(leaf.cost(), 1);
        assert_eq!(leaf.depth(), 1);
        assert_eq!(leaf.guess().text(), "ab");
    }

    #[test]
    fn node_cost_and_depth() {
        let tree = perfect_split();
        assert_eq!(tree.answer_count(), 4);
        assert_eq!(tree.cost(), 7);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.depth_histogram(), BTreeMap::from([(1, 1), (2, 3)]));
    }

    #[test]
    fn play_reaches_every_answer() {
        let tree = perfect_split();
        for answer in ["ab", "ba", "aa", "bb"] {
            let secret = word(answer);
            let guesses = tree.play(&secret).unwrap();
            assert_eq!(guesses.last().copied(), Some(&secret));
            assert!(guesses.len() <= 2);
        }
    }

    #[test]
    fn play_rejects_unknown_secret() {
        let tree = perfect_split();
        assert!(tree.play(&word("cc")).is_none());
        assert!(GuessTree::Leaf(word("ab")).play(&word("ba")).is_none());
    }

    #[test]
    fn answers_lists_every_resolved_word() {
        let tree = perfect_split();
        let mut answers: Vec<&str> = tree.answers().into_iter().map(Word::text).collect();
        answers.sort_unstable();
        assert_eq!(answers, ["aa", "ab", "ba", "bb"]);
    }

    #[test]
    fn nested_tree_cost() {
        // Guess "zz" first (no information), then the perfect split
        let inner = perfect_split();
        let guess = word("zz");
        let pattern = Pattern::calculate(&guess, &word("ab"));
        let tree = GuessTree::Node {
            guess,
            branches: BTreeMap::from([(pattern, inner)]),
        };
        assert_eq!(tree.cost(), 4 + 7);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.play(&word("bb")).unwrap().len(), 3);
    }
}
