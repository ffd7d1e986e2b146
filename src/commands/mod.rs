//! Command implementations

pub mod analyze;
pub mod play;
pub mod simulate;
pub mod solve;

pub use analyze::{AnalysisResult, GuessAnalysis, analyze_guesses};
pub use play::{PlayError, PlayResult, PlayStep, play_secret};
pub use simulate::{SimulationResult, simulate};
pub use solve::{SolveReport, run_search};
