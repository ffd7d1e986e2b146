//! Word pools
//!
//! A pool is a duplicate-free set of equal-length words. Input order is kept so
//! that searches over the same pool are reproducible.

use super::Word;
use rustc_hash::FxHashSet;
use std::fmt;

/// Error type for invalid pools
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    Empty,
    MixedLengths { expected: usize, found: usize, word: String },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Word pool is empty"),
            Self::MixedLengths {
                expected,
                found,
                word,
            } => write!(
                f,
                "Word '{word}' has {found} letters, pool words have {expected}"
            ),
        }
    }
}

impl std::error::Error for PoolError {}

/// A set of unique words sharing one length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<Word>,
    word_len: usize,
}

impl WordPool {
    /// Build a pool, dropping duplicates while keeping first-seen order
    ///
    /// # Errors
    /// Returns `PoolError` if the pool is empty or the words differ in length.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Word, WordPool};
    ///
    /// let words = ["crane", "slate", "crane"].map(|w| Word::new(w).unwrap());
    /// let pool = WordPool::new(words).unwrap();
    /// assert_eq!(pool.len(), 2);
    /// assert_eq!(pool.word_len(), 5);
    /// ```
    pub fn new(words: impl IntoIterator<Item = Word>) -> Result<Self, PoolError> {
        let mut seen = FxHashSet::default();
        let mut unique = Vec::new();
        let mut word_len = None;

        for word in words {
            match word_len {
                None => word_len = Some(word.len()),
                Some(expected) if expected != word.len() => {
                    return Err(PoolError::MixedLengths {
                        expected,
                        found: word.len(),
                        word: word.text().to_string(),
                    });
                }
                Some(_) => {}
            }
            if seen.insert(word.clone()) {
                unique.push(word);
            }
        }

        let word_len = word_len.ok_or(PoolError::Empty)?;
        Ok(Self {
            words: unique,
            word_len,
        })
    }

    /// Combine two pools, keeping `self`'s order and appending new words from `other`
    ///
    /// # Errors
    /// Returns `PoolError::MixedLengths` if the pools' word lengths differ.
    pub fn union(&self, other: &Self) -> Result<Self, PoolError> {
        Self::new(self.words.iter().chain(&other.words).cloned())
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Letters per word
    #[inline]
    #[must_use]
    pub const fn word_len(&self) -> usize {
        self.word_len
    }

    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)] // Pools are never empty
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.words.contains(word)
    }

    /// Find a pool word by its text
    #[must_use]
    pub fn find(&self, text: &str) -> Option<&Word> {
        let text = text.to_lowercase();
        self.words.iter().find(|w| w.text() == text)
    }
}
