//! Word list loading
//!
//! Blank lines are skipped, surrounding whitespace is trimmed and words are
//! lowercased. Anything else that is not a valid word is an error that names
//! its line.

use crate::core::{PoolError, Word, WordError, WordPool};
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for word list loading
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    InvalidWord {
        line: usize,
        text: String,
        source: WordError,
    },
    Pool(PoolError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Cannot read word list {}: {source}", path.display())
            }
            Self::InvalidWord { line, text, source } => {
                write!(f, "Line {line}: '{text}' is not a valid word ({source})")
            }
            Self::Pool(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidWord { source, .. } => Some(source),
            Self::Pool(err) => Some(err),
        }
    }
}

impl From<PoolError> for LoadError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}

/// Load a word pool from a file
///
/// # Errors
///
/// Returns `LoadError` if the file cannot be read, a line is not a valid word,
/// or the words do not form a pool (empty, or mixed lengths).
///
/// # Examples
/// ```no_run
/// use wordle_tree::wordlists::load_pool;
///
/// let pool = load_pool("data/answers.txt").unwrap();
/// println!("Loaded {} words", pool.len());
/// ```
pub fn load_pool<P: AsRef<Path>>(path: P) -> Result<WordPool, LoadError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let pool = parse_pool(&content)?;
    info!(
        "loaded {} words of {} letters from {}",
        pool.len(),
        pool.word_len(),
        path.display()
    );
    Ok(pool)
}

/// Parse a word pool from word list text
///
/// # Errors
///
/// Returns `LoadError::InvalidWord` for the first invalid line (numbered from
/// 1), or `LoadError::Pool` if the words do not form a pool.
///
/// # Examples
/// ```
/// use wordle_tree::wordlists::parse_pool;
///
/// let pool = parse_pool("crane\n\n  Slate \ncrane\n").unwrap();
/// assert_eq!(pool.len(), 2);
///
/// assert!(parse_pool("crane\nsl8te\n").is_err());
/// ```
pub fn parse_pool(content: &str) -> Result<WordPool, LoadError> {
    let words = content
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, text)| !text.is_empty())
        .map(|(line, text)| {
            Word::new(text).map_err(|source| LoadError::InvalidWord {
                line,
                text: text.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let listed = words.len();
    let pool = WordPool::new(words)?;
    if pool.len() < listed {
        debug!("dropped {} duplicate words", listed - pool.len());
    }
    Ok(pool)
}
