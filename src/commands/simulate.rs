//! Simulate command
//!
//! Plays a computed tree against every answer and collects statistics.

use crate::core::Word;
use crate::solver::GuessTree;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Statistics from playing a tree against a list of answers
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub total_words: usize,
    pub total_guesses: usize,
    pub average_guesses: f64,
    pub min_guesses: usize,
    pub max_guesses: usize,
    pub distribution: BTreeMap<usize, usize>,
    /// Answers the tree does not reach
    pub failed: Vec<String>,
    /// Answers needing the most guesses
    pub worst_words: Vec<(String, usize)>,
    pub duration: Duration,
    pub words_per_second: f64,
}

/// Play `tree` against each word in `answers`
///
/// With `show_progress` a progress bar is drawn on stderr.
#[must_use]
pub fn simulate(tree: &GuessTree, answers: &[Word], show_progress: bool) -> SimulationResult {
    let pb = if show_progress {
        ProgressBar::new(answers.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░"));
    }

    let start = Instant::now();
    let mut total_guesses = 0;
    let mut min_guesses = usize::MAX;
    let mut max_guesses = 0;
    let mut distribution: BTreeMap<usize, usize> = BTreeMap::new();
    let mut failed = Vec::new();
    let mut solved: Vec<(String, usize)> = Vec::with_capacity(answers.len());

    for answer in answers {
        match tree.play(answer) {
            Some(guesses) => {
                let count = guesses.len();
                total_guesses += count;
                min_guesses = min_guesses.min(count);
                max_guesses = max_guesses.max(count);
                *distribution.entry(count).or_insert(0) += 1;
                solved.push((answer.text().to_string(), count));
            }
            None => failed.push(answer.text().to_string()),
        }
        pb.inc(1);
        pb.set_message(answer.text().to_string());
    }
    pb.finish_and_clear();

    let duration = start.elapsed();
    let total_words = answers.len();
    let solved_words = solved.len();

    solved.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    solved.truncate(10);

    SimulationResult {
        total_words,
        total_guesses,
        average_guesses: if solved_words == 0 {
            0.0
        } else {
            total_guesses as f64 / solved_words as f64
        },
        min_guesses: if solved_words == 0 { 0 } else { min_guesses },
        max_guesses,
        distribution,
        failed,
        worst_words: solved,
        duration,
        words_per_second: total_words as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
