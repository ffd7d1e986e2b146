//! Hard-mode guess restrictions
//!
//! After feedback is revealed, later guesses must reuse every Hit letter in
//! its position and contain every revealed letter at least as many times as it
//! was marked Hit or Present. Missed letters may be guessed again.

use crate::core::{ALPHABET_SIZE, Feedback, Pattern, Word};

/// Requirements revealed by one (guess, pattern) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    fixed: Vec<(usize, u8)>,
    min_counts: [u8; ALPHABET_SIZE],
}

impl Constraint {
    /// Requirements implied by seeing `pattern` after guessing `guess`
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Pattern, Word};
    /// use wordle_tree::solver::hard_mode::Constraint;
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let pattern = Pattern::from_str("MPHMM").unwrap();
    /// let constraint = Constraint::new(&guess, pattern);
    ///
    /// assert!(constraint.allows(&Word::new("roast").unwrap()));
    /// assert!(!constraint.allows(&Word::new("rusty").unwrap())); // no A in position 2
    /// ```
    #[must_use]
    pub fn new(guess: &Word, pattern: Pattern) -> Self {
        let mut fixed = Vec::new();
        let mut min_counts = [0u8; ALPHABET_SIZE];

        for (i, (&letter, feedback)) in guess.chars().iter().zip(pattern.iter()).enumerate() {
            match feedback {
                Feedback::Hit => {
                    fixed.push((i, letter));
                    min_counts[usize::from(letter - b'a')] += 1;
                }
                Feedback::Present => min_counts[usize::from(letter - b'a')] += 1,
                Feedback::Miss => {}
            }
        }

        Self { fixed, min_counts }
    }

    /// Whether `word` may be guessed under this constraint
    #[must_use]
    pub fn allows(&self, word: &Word) -> bool {
        if !self.fixed.iter().all(|&(i, letter)| word.char_at(i) == letter) {
            return false;
        }
        let counts = word.char_counts();
        self.min_counts
            .iter()
            .zip(counts)
            .all(|(&needed, have)| have >= needed)
    }
}

/// Guesses still allowed after `pattern` was revealed for `guess`
#[must_use]
pub fn filter_guesses<'a>(guesses: &[&'a Word], guess: &Word, pattern: Pattern) -> Vec<&'a Word> {
    let constraint = Constraint::new(guess, pattern);
    guesses
        .iter()
        .copied()
        .filter(|w| constraint.allows(w))
        .collect()
}
