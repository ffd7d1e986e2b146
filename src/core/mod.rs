//! Core domain types
//!
//! Words, feedback patterns and word pools. Everything here is pure and has no
//! knowledge of the search.

mod pattern;
mod pool;
mod word;

pub use pattern::{Feedback, Pattern, pattern_count};
pub use pool::{PoolError, WordPool};
pub use word::{ALPHABET_SIZE, MAX_WORD_LEN, Word, WordError};
