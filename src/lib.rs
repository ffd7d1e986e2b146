//! Wordle Tree
//!
//! Builds complete guessing strategies for Wordle-style games: decision trees
//! that solve every answer in a pool within a depth limit while keeping the
//! total number of guesses low.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use wordle_tree::core::{Word, WordPool};
//! use wordle_tree::solver::{SearchConfig, solve};
//!
//! let words = ["crane", "slate", "trace", "crate"].map(|w| Word::new(w).unwrap());
//! let pool = WordPool::new(words).unwrap();
//!
//! let outcome = solve(&pool, &pool, SearchConfig::default()).unwrap();
//! println!("Total guesses: {:?}", outcome.cost());
//! ```

// Core domain types
pub mod core;

// Tree search
pub mod solver;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
