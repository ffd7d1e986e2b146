//! Display functions for command results

use super::formatters::{create_progress_bar, format_tree};
use crate::commands::{AnalysisResult, PlayResult, SimulationResult, SolveReport};
use crate::solver::SearchOutcome;
use colored::Colorize;
use std::collections::BTreeMap;

fn print_header(title: &str) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", title.bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());
}

fn print_distribution(distribution: &BTreeMap<usize, usize>, total: usize) {
    for (&guesses, &count) in distribution {
        let pct = (count as f64 / total as f64) * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {guesses}: {} {count:5} ({pct:5.1}%)", bar.green());
    }
}

/// Print the result of a search session
pub fn print_solve_report(report: &SolveReport, show_tree: bool) {
    print_header("SEARCH RESULT");

    println!(
        "\n   Answers: {}   Guesses: {}   Depth limit: {}",
        report.answers, report.guesses, report.max_depth
    );

    match &report.outcome {
        SearchOutcome::Solved(solution) => {
            println!(
                "   Opening guess:    {}",
                solution.tree.guess().text().to_uppercase().bright_yellow().bold()
            );
            println!(
                "   Total guesses:    {}",
                solution.cost.to_string().bright_yellow().bold()
            );
            if let Some(average) = report.average_guesses() {
                println!("   Average guesses:  {average:.4}");
            }
            println!("   Deepest answer:   {}", solution.tree.depth());

            println!("\n📈 {}", "Distribution:".bright_cyan().bold());
            let distribution = solution
                .tree
                .depth_histogram()
                .into_iter()
                .map(|(depth, count)| (depth as usize, count))
                .collect();
            print_distribution(&distribution, report.answers);

            if show_tree {
                println!("\n🌳 {}", "Tree:".bright_cyan().bold());
                print!("{}", format_tree(&solution.tree));
            }
        }
        SearchOutcome::Unsolvable => {
            println!(
                "\n{}",
                "❌ No strategy within the budget and depth limit"
                    .red()
                    .bold()
            );
        }
    }

    println!("\n🔎 {}", "Search:".bright_cyan().bold());
    println!(
        "   Nodes: {}   Candidates: {}   Pruned: {}   Cut by bound: {}",
        report.stats.nodes, report.stats.candidates, report.stats.pruned, report.stats.infeasible
    );
    println!(
        "   Partitions: {} memoized, {} reused, {} derived, {} direct",
        report.cache.misses, report.cache.hits, report.cache.derived, report.cache.direct
    );
    println!("   Time taken: {:.2}s", report.duration.as_secs_f64());
}

/// Print the result of simulating a tree over all answers
pub fn print_simulation_result(result: &SimulationResult) {
    print_header("SIMULATION RESULTS");

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Words tested:     {}", result.total_words);
    println!(
        "   Average guesses:  {}",
        format!("{:.3}", result.average_guesses)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_guesses).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_guesses).yellow()
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Words/second:     {:.1}", result.words_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    print_distribution(&result.distribution, result.total_words);

    if !result.worst_words.is_empty() {
        println!("\n🐢 {}", "Hardest words:".bright_cyan().bold());
        for (word, guesses) in &result.worst_words {
            println!("   {} ({guesses})", word.to_uppercase());
        }
    }

    if !result.failed.is_empty() {
        println!(
            "\n{}",
            format!("❌ {} words not reached:", result.failed.len())
                .red()
                .bold()
        );
        for word in &result.failed {
            println!("   {}", word.to_uppercase());
        }
    }
}

/// Print a replay of the tree against one secret
pub fn print_play_result(result: &PlayResult) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Playing: {}",
        result.target.to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());

    for (i, step) in result.steps.iter().enumerate() {
        println!(
            "\nTurn {}: {} {}",
            i + 1,
            step.word.to_uppercase(),
            step.pattern.to_emoji()
        );
        println!(
            "  Candidates: {} → {}",
            step.candidates_before, step.candidates_after
        );
    }

    println!();
    if result.success {
        println!(
            "{}",
            format!("✅ Solved in {} guesses!", result.steps.len())
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "❌ {} is not an answer this tree covers",
                result.target.to_uppercase()
            )
            .red()
            .bold()
        );
    }
}

/// Print the worst-case ranking of opening guesses
pub fn print_analysis_result(result: &AnalysisResult) {
    print_header("WORST-CASE ANALYSIS");

    println!(
        "\n📊 {} guesses against {} possible answers",
        result.total_guesses, result.total_answers
    );

    if let Some(minimum) = result.best_worst_case() {
        println!(
            "\n{} {}",
            "Best worst case:".bright_cyan().bold(),
            format!("{minimum} answers").bright_yellow()
        );
        for guess in &result.best {
            println!("   {} is a good choice", guess.word.to_uppercase().green());
        }
    }

    println!("\n🏆 {}", "Top guesses:".bright_cyan().bold());
    for (i, guess) in result.ranked.iter().enumerate() {
        let marker = if guess.is_answer { "★" } else { " " };
        println!(
            "   {:3}. {} {marker} worst {:5}  buckets {:4}  info {:10.1}",
            i + 1,
            guess.word.to_uppercase(),
            guess.worst_case,
            guess.buckets,
            guess.information
        );
    }
}
