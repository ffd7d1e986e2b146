//! Play command
//!
//! Follows a tree against one known secret, recording every step.

use crate::core::{Pattern, Word, WordError};
use crate::solver::GuessTree;
use std::fmt;

/// Error type for replaying a tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    InvalidWord(WordError),
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWord(err) => write!(f, "Invalid secret word: {err}"),
            Self::LengthMismatch { expected, found } => {
                write!(f, "Secret has {found} letters, the tree plays {expected}")
            }
        }
    }
}

impl std::error::Error for PlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidWord(err) => Some(err),
            Self::LengthMismatch { .. } => None,
        }
    }
}

/// A single guess in a replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayStep {
    pub word: String,
    pub pattern: Pattern,
    pub candidates_before: usize,
    pub candidates_after: usize,
}

/// Result of replaying a tree against a secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayResult {
    pub target: String,
    pub steps: Vec<PlayStep>,
    pub success: bool,
}

/// Replay `tree` against `secret`
///
/// A secret the tree was not built for ends the replay with `success == false`
/// at the first pattern the tree has no branch for.
///
/// # Errors
///
/// Returns `PlayError` if `secret` is not a valid word or its length differs
/// from the tree's words.
pub fn play_secret(tree: &GuessTree, secret: &str) -> Result<PlayResult, PlayError> {
    let target = Word::new(secret).map_err(PlayError::InvalidWord)?;
    let expected = tree.guess().len();
    if target.len() != expected {
        return Err(PlayError::LengthMismatch {
            expected,
            found: target.len(),
        });
    }

    let mut steps = Vec::new();
    let mut node = tree;
    let success = loop {
        let guess = node.guess();
        let pattern = Pattern::calculate(guess, &target);
        let candidates_before = node.answer_count();

        let next = match node {
            GuessTree::Node { branches, .. } if !pattern.is_perfect() => branches.get(&pattern),
            _ => None,
        };

        steps.push(PlayStep {
            word: guess.text().to_string(),
            pattern,
            candidates_before,
            candidates_after: match next {
                Some(branch) => branch.answer_count(),
                None => usize::from(pattern.is_perfect()),
            },
        });

        match next {
            Some(branch) => node = branch,
            None => break pattern.is_perfect(),
        }
    };

    Ok(PlayResult {
        target: target.text().to_string(),
        steps,
        success,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{SearchConfig, solve};
    use crate::wordlists::parse_pool;

    fn tree() -> GuessTree {
        let pool = parse_pool("crane\nslate\ntrace\ncrate\ngrate\nirate\nstare\n").unwrap();
        solve(&pool, &pool, SearchConfig::default())
            .unwrap()
            .into_solution()
            .unwrap()
            .tree
    }

    #[test]
    fn replay_reaches_every_answer() {
        let tree = tree();
        for answer in ["crane", "slate", "trace", "crate", "grate", "irate", "stare"] {
            let result = play_secret(&tree, answer).unwrap();
            assert!(result.success, "{answer} not reached");
            assert_eq!(result.steps.last().unwrap().word, answer);
            assert!(result.steps.last().unwrap().pattern.is_perfect());
            assert_eq!(result.steps.len(), tree.play(&Word::new(answer).unwrap()).unwrap().len());
        }
    }

    #[test]
    fn candidates_shrink_each_step() {
        let tree = tree();
        let result = play_secret(&tree, "GRATE").unwrap();
        assert_eq!(result.target, "grate");
        assert_eq!(result.steps[0].candidates_before, 7);
        for step in &result.steps {
            assert!(step.candidates_after <= step.candidates_before);
        }
        assert_eq!(result.steps.last().unwrap().candidates_after, 1);
    }

    #[test]
    fn unknown_secret_fails_without_error() {
        let result = play_secret(&tree(), "zzzzz").unwrap();
        assert!(!result.success);
        assert!(!result.steps.is_empty());
    }

    #[test]
    fn invalid_secrets_are_errors() {
        let tree = tree();
        assert!(matches!(
            play_secret(&tree, "cr4ne"),
            Err(PlayError::InvalidWord(_))
        ));
        assert_eq!(
            play_secret(&tree, "cranes"),
            Err(PlayError::LengthMismatch {
                expected: 5,
                found: 6
            })
        );
    }
}
