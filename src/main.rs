//! Wordle Tree - CLI
//!
//! Builds and inspects complete guessing trees for Wordle-style word lists.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use wordle_tree::{
    commands::{analyze_guesses, play_secret, run_search, simulate},
    core::WordPool,
    output::{print_analysis_result, print_play_result, print_simulation_result, print_solve_report},
    solver::{Heuristic, SearchConfig},
    wordlists::load_pool,
};

#[derive(Parser)]
#[command(
    name = "wordle_tree",
    about = "Search for Wordle decision trees that minimize the total number of guesses",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Answer word list (one word per line)
    #[arg(short, long, global = true)]
    answers: Option<PathBuf>,

    /// Allowed guess word list (default: the answer list); answers are always allowed
    #[arg(short, long, global = true)]
    guesses: Option<PathBuf>,

    /// Hard mode: later guesses must use revealed hints
    #[arg(long, global = true)]
    hard: bool,

    /// Maximum guesses for any answer
    #[arg(short, long, global = true, default_value_t = 6)]
    depth: u32,

    /// Only accept trees whose total guess count is below this
    #[arg(short, long, global = true)]
    budget: Option<u32>,

    /// Seed for candidate sampling
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    /// Candidate guesses explored per node
    #[arg(long, global = true, default_value_t = 50)]
    cap: usize,

    /// Fraction of non-answer guesses sampled at each node
    #[arg(long, global = true, default_value_t = 0.1)]
    fraction: f64,

    /// Candidate ordering: information (default) or worst-case
    #[arg(long, global = true, default_value = "information")]
    heuristic: Heuristic,

    /// Explore opening candidates in parallel
    #[arg(long, global = true)]
    parallel: bool,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a tree and report its cost
    Solve {
        /// Force the opening guess
        #[arg(short, long)]
        opening: Option<String>,

        /// Print the full tree
        #[arg(short, long)]
        tree: bool,
    },

    /// Play the tree against every answer and show the guess distribution
    Simulate {
        /// Force the opening guess
        #[arg(short, long)]
        opening: Option<String>,
    },

    /// Replay the tree against one secret word
    Play {
        /// The secret word
        secret: String,

        /// Force the opening guess
        #[arg(short, long)]
        opening: Option<String>,
    },

    /// Rank opening guesses by their worst-case bucket
    Analyze {
        /// Number of guesses to list
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

impl Cli {
    fn search_config(&self, opening: Option<String>) -> SearchConfig {
        SearchConfig {
            hard_mode: self.hard,
            budget: self.budget.unwrap_or(SearchConfig::UNBOUNDED),
            max_depth: self.depth,
            heuristic: self.heuristic,
            guess_sample_fraction: self.fraction,
            candidate_cap: self.cap,
            seed: self.seed,
            parallel: self.parallel,
            opening,
            ..SearchConfig::default()
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load(path: &Path) -> Result<WordPool> {
    load_pool(path).with_context(|| format!("Failed to load word list {}", path.display()))
}

/// Load the pools named on the command line
///
/// Returns (`guess_pool`, `answer_pool`); answers are always valid guesses.
fn load_wordlists(cli: &Cli) -> Result<(WordPool, WordPool)> {
    let Some(answers_path) = cli.answers.as_deref() else {
        bail!("An answer word list is required (--answers <FILE>)");
    };
    let answers = load(answers_path)?;

    let guesses = match cli.guesses.as_deref() {
        Some(path) => load(path)?
            .union(&answers)
            .context("Guess and answer lists use different word lengths")?,
        None => answers.clone(),
    };
    Ok((guesses, answers))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (guesses, answers) = load_wordlists(&cli)?;

    match &cli.command {
        Commands::Solve { opening, tree } => {
            let report = run_search(&guesses, &answers, cli.search_config(opening.clone()))?;
            print_solve_report(&report, *tree);
        }
        Commands::Simulate { opening } => {
            let report = run_search(&guesses, &answers, cli.search_config(opening.clone()))?;
            let Some(tree) = report.outcome.tree() else {
                print_solve_report(&report, false);
                return Ok(());
            };
            let result = simulate(tree, answers.words(), true);
            print_simulation_result(&result);
        }
        Commands::Play { secret, opening } => {
            let report = run_search(&guesses, &answers, cli.search_config(opening.clone()))?;
            let Some(tree) = report.outcome.tree() else {
                print_solve_report(&report, false);
                return Ok(());
            };
            let result = play_secret(tree, secret)?;
            print_play_result(&result);
        }
        Commands::Analyze { count } => {
            let result = analyze_guesses(&guesses, &answers, *count);
            print_analysis_result(&result);
        }
    }

    Ok(())
}
