//! Word lists
//!
//! Pools are read from plain text files, one word per line.

pub mod loader;

pub use loader::{LoadError, load_pool, parse_pool};
