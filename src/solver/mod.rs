//! Decision tree search
//!
//! Partitioning, candidate ranking, lower bounds and the branch-and-bound
//! search that combines them into a [`GuessTree`].

pub mod bounds;
mod config;
pub mod hard_mode;
mod partition;
pub mod ranking;
mod search;
mod tree;

pub use config::{Heuristic, SearchConfig};
pub use partition::{Bucket, CacheStats, DERIVE_THRESHOLD, Partition, PartitionCache};
pub use search::{SearchError, SearchOutcome, SearchStats, Solution, TreeSearch, solve};
pub use tree::GuessTree;
