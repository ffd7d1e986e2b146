//! Opening analysis command
//!
//! Scores every guess by the worst case it leaves behind: the size of the
//! largest bucket it splits the answers into.

use crate::core::{Word, WordPool};
use crate::solver::Partition;
use rayon::prelude::*;

/// One guess's split of the answer pool
#[derive(Debug, Clone, PartialEq)]
pub struct GuessAnalysis {
    pub word: String,
    /// Answers left in the largest bucket
    pub worst_case: usize,
    pub buckets: usize,
    /// `Σ size·log2(size)` over buckets
    pub information: f64,
    pub is_answer: bool,
}

impl GuessAnalysis {
    fn new(guess: &Word, answers: &[&Word], is_answer: bool) -> Self {
        let partition = Partition::compute(guess, answers, usize::MAX);
        Self {
            word: guess.text().to_string(),
            worst_case: partition.largest(),
            buckets: partition.len(),
            information: partition.weighted_information(),
            is_answer,
        }
    }
}

/// Result of analyzing all guesses
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub total_answers: usize,
    pub total_guesses: usize,
    /// Every guess achieving the smallest worst case
    pub best: Vec<GuessAnalysis>,
    /// The `top` best guesses overall
    pub ranked: Vec<GuessAnalysis>,
}

impl AnalysisResult {
    /// The smallest worst case any guess achieves
    #[must_use]
    pub fn best_worst_case(&self) -> Option<usize> {
        self.best.first().map(|g| g.worst_case)
    }
}

/// Rank every word of `guess_pool` by worst-case bucket size against `answer_pool`
///
/// Ties are broken by weighted information, then by preferring answers, then
/// alphabetically.
#[must_use]
pub fn analyze_guesses(guess_pool: &WordPool, answer_pool: &WordPool, top: usize) -> AnalysisResult {
    let answers: Vec<&Word> = answer_pool.words().iter().collect();

    let mut all: Vec<GuessAnalysis> = guess_pool
        .words()
        .par_iter()
        .map(|guess| GuessAnalysis::new(guess, &answers, answer_pool.contains(guess)))
        .collect();

    all.sort_by(|a, b| {
        a.worst_case
            .cmp(&b.worst_case)
            .then_with(|| a.information.total_cmp(&b.information))
            .then_with(|| b.is_answer.cmp(&a.is_answer))
            .then_with(|| a.word.cmp(&b.word))
    });

    let minimum = all.first().map_or(0, |g| g.worst_case);
    let best = all
        .iter()
        .take_while(|g| g.worst_case == minimum)
        .cloned()
        .collect();
    all.truncate(top);

    AnalysisResult {
        total_answers: answer_pool.len(),
        total_guesses: guess_pool.len(),
        best,
        ranked: all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::parse_pool;

    #[test]
    fn best_guesses_share_minimum_worst_case() {
        let answers = parse_pool("ab\nba\naa\nbb\n").unwrap();
        let guesses = parse_pool("ab\nba\naa\nbb\ncc\n").unwrap();

        let result = analyze_guesses(&guesses, &answers, 10);

        assert_eq!(result.best_worst_case(), Some(1));
        assert!(result.best.iter().all(|g| g.worst_case == 1));
        assert!(result.best.iter().all(|g| g.word != "cc"));
        assert_eq!(result.ranked.last().unwrap().word, "cc");
        assert_eq!(result.ranked.last().unwrap().worst_case, 4);
    }

    #[test]
    fn ranked_list_is_truncated_and_ordered() {
        let pool = parse_pool("crane\nslate\ntrace\ncrate\ngrate\nirate\nstare\n").unwrap();
        let result = analyze_guesses(&pool, &pool, 3);

        assert_eq!(result.ranked.len(), 3);
        assert_eq!(result.total_guesses, 7);
        assert!(
            result
                .ranked
                .windows(2)
                .all(|w| w[0].worst_case <= w[1].worst_case)
        );
        assert!(result.ranked.iter().all(|g| g.is_answer));
    }

    #[test]
    fn buckets_cover_all_answers() {
        let pool = parse_pool("crane\nslate\ntrace\n").unwrap();
        let result = analyze_guesses(&pool, &pool, usize::MAX);
        for guess in &result.ranked {
            assert!(guess.buckets >= 1 && guess.buckets <= 3);
            assert!(guess.worst_case >= 1);
        }
    }
}
