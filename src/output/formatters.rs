//! Formatting utilities for terminal output

use crate::solver::GuessTree;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Render a tree as indented text, one line per guess
///
/// Each branch line shows the feedback that leads to it followed by the next
/// guess. Perfect branches are omitted since they end the game.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
/// use wordle_tree::core::{Pattern, Word};
/// use wordle_tree::output::formatters::format_tree;
/// use wordle_tree::solver::GuessTree;
///
/// let ab = Word::new("ab").unwrap();
/// let ba = Word::new("ba").unwrap();
/// let tree = GuessTree::Node {
///     guess: ab.clone(),
///     branches: BTreeMap::from([
///         (Pattern::calculate(&ab, &ab), GuessTree::Leaf(ab.clone())),
///         (Pattern::calculate(&ab, &ba), GuessTree::Leaf(ba)),
///     ]),
/// };
///
/// assert_eq!(format_tree(&tree), "AB (2)\n  🟨🟨 BA\n");
/// ```
#[must_use]
pub fn format_tree(tree: &GuessTree) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        tree.guess().text().to_uppercase(),
        tree.answer_count()
    ));
    write_branches(tree, 1, &mut out);
    out
}

fn write_branches(tree: &GuessTree, level: usize, out: &mut String) {
    let GuessTree::Node { branches, .. } = tree else {
        return;
    };
    let indent = "  ".repeat(level);
    for (pattern, branch) in branches {
        if pattern.is_perfect() {
            continue;
        }
        let line = match branch {
            GuessTree::Leaf(word) => format!(
                "{indent}{} {}\n",
                pattern.to_emoji(),
                word.text().to_uppercase()
            ),
            GuessTree::Node { guess, .. } => format!(
                "{indent}{} {} ({})\n",
                pattern.to_emoji(),
                guess.text().to_uppercase(),
                branch.answer_count()
            ),
        };
        out.push_str(&line);
        write_branches(branch, level + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Pattern, Word};
    use std::collections::BTreeMap;

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn leaf_renders_single_line() {
        let tree = GuessTree::Leaf(Word::new("crane").unwrap());
        assert_eq!(format_tree(&tree), "CRANE (1)\n");
    }

    #[test]
    fn sibling_branches_each_get_a_line() {
        let word = |w: &str| Word::new(w).unwrap();
        let guess = word("ab");
        let branches = ["ab", "ba", "aa", "bb"]
            .iter()
            .map(|w| (Pattern::calculate(&guess, &word(w)), GuessTree::Leaf(word(w))))
            .collect();
        let tree = GuessTree::Node { guess, branches };

        let rendered = format_tree(&tree);
        assert_eq!(rendered.lines().count(), 4);
        assert!(rendered.starts_with("AB (4)\n"));
        assert!(rendered.lines().skip(1).all(|line| line.starts_with("  ")));
        assert!(rendered.contains("🟨🟨 BA\n"));
    }

    #[test]
    fn nested_branches_are_indented() {
        let word = |w: &str| Word::new(w).unwrap();
        let inner = GuessTree::Node {
            guess: word("ba"),
            branches: BTreeMap::from([
                (Pattern::perfect(2), GuessTree::Leaf(word("ba"))),
                (Pattern::calculate(&word("ba"), &word("bb")), GuessTree::Leaf(word("bb"))),
            ]),
        };
        let tree = GuessTree::Node {
            guess: word("cc"),
            branches: BTreeMap::from([(Pattern::calculate(&word("cc"), &word("ba")), inner)]),
        };

        assert_eq!(format_tree(&tree), "CC (2)\n  ⬜⬜ BA (2)\n    🟩⬜ BB\n");
    }
}
