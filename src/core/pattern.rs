//! Feedback pattern calculation and representation
//!
//! A pattern encodes the feedback from a guess using base-3 encoding:
//! - 0 = Miss (letter not in word)
//! - 1 = Present (letter in word, wrong position)
//! - 2 = Hit (letter in correct position)
//!
//! The pattern is stored as a single `u16` value where each position
//! contributes digit × 3^position to the total, together with the word length.

use super::Word;
use super::word::{MAX_WORD_LEN, letter_index};
use std::fmt;

/// Per-position feedback symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Letter not in the answer (or all its instances already accounted for)
    Miss,
    /// Letter in the answer at another position
    Present,
    /// Letter at this exact position
    Hit,
}

impl Feedback {
    #[inline]
    const fn digit(self) -> u16 {
        match self {
            Self::Miss => 0,
            Self::Present => 1,
            Self::Hit => 2,
        }
    }

    #[inline]
    const fn from_digit(digit: u16) -> Self {
        match digit {
            2 => Self::Hit,
            1 => Self::Present,
            _ => Self::Miss,
        }
    }

    /// Single-letter symbol used by `Display`
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Miss => 'M',
            Self::Present => 'P',
            Self::Hit => 'H',
        }
    }
}

/// Feedback pattern for one guess against one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pattern {
    value: u16,
    len: u8,
}

/// Number of distinct patterns for words of `len` letters (`3^len`)
#[inline]
#[must_use]
pub const fn pattern_count(len: usize) -> u32 {
    3u32.pow(len as u32)
}

impl Pattern {
    /// Create a pattern from a raw value and a word length
    ///
    /// # Panics
    /// Panics in debug mode if the value does not fit `len` positions
    #[inline]
    #[must_use]
    pub const fn new(value: u16, len: usize) -> Self {
        debug_assert!(len <= MAX_WORD_LEN, "Pattern length out of range");
        debug_assert!((value as u32) < pattern_count(len), "Pattern value out of range");
        Self {
            value,
            len: len as u8,
        }
    }

    /// The all-Hit pattern for words of `len` letters
    #[inline]
    #[must_use]
    pub const fn perfect(len: usize) -> Self {
        Self::new((pattern_count(len) - 1) as u16, len)
    }

    /// Get the raw pattern value
    #[inline]
    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    /// Number of positions
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(self) -> usize {
        self.len as usize
    }

    /// Check if this is a perfect match (all Hit)
    #[inline]
    #[must_use]
    pub const fn is_perfect(self) -> bool {
        self.value as u32 == pattern_count(self.len as usize) - 1
    }

    /// Build a pattern from per-position feedback
    ///
    /// # Panics
    /// Panics if more than [`MAX_WORD_LEN`] symbols are given
    #[must_use]
    pub fn from_feedback(symbols: &[Feedback]) -> Self {
        assert!(symbols.len() <= MAX_WORD_LEN, "too many feedback symbols");
        let mut value = 0u16;
        let mut multiplier = 1u16;
        for symbol in symbols {
            value += symbol.digit() * multiplier;
            multiplier = multiplier.wrapping_mul(3);
        }
        Self::new(value, symbols.len())
    }

    /// Feedback at a position
    ///
    /// # Panics
    /// Panics in debug mode if `position >= self.len()`
    #[must_use]
    pub fn get(self, position: usize) -> Feedback {
        debug_assert!(position < self.len());
        Feedback::from_digit(self.value / 3u16.pow(position as u32) % 3)
    }

    /// Iterate feedback symbols in position order
    pub fn iter(self) -> impl Iterator<Item = Feedback> {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// Calculate the pattern when `guess` is guessed and `answer` is the target
    ///
    /// Handles duplicate letters: a letter is never reported Hit or Present more
    /// times than it occurs in the answer.
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches (Hit) and remove them from the answer's pool
    /// 2. Second pass: in ascending position order, mark Present while the pool
    ///    still holds the letter, removing one instance each time
    /// 3. Encode as base-3 number
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Word, Pattern};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    /// let pattern = Pattern::calculate(&guess, &answer);
    ///
    /// assert_eq!(pattern.to_string(), "MMHMH");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        debug_assert_eq!(guess.len(), answer.len(), "words differ in length");

        let guess_chars = guess.chars();
        let answer_chars = answer.chars();
        let mut result = [Feedback::Miss; MAX_WORD_LEN];
        let mut answer_available = [0u8; 26];

        // First pass: Hits, and count the answer letters left over
        for (i, (&g, &a)) in guess_chars.iter().zip(answer_chars).enumerate() {
            if g == a {
                result[i] = Feedback::Hit;
            } else {
                answer_available[letter_index(a)] += 1;
            }
        }

        // Second pass: Presents from the remaining pool
        for (i, &g) in guess_chars.iter().enumerate() {
            if result[i] == Feedback::Miss {
                let count = &mut answer_available[letter_index(g)];
                if *count > 0 {
                    result[i] = Feedback::Present;
                    *count -= 1;
                }
            }
        }

        Self::from_feedback(&result[..guess_chars.len()])
    }

    /// Count the number of Hit positions
    #[must_use]
    pub fn count_hits(self) -> usize {
        self.iter().filter(|&f| f == Feedback::Hit).count()
    }

    /// Count the number of Present positions
    #[must_use]
    pub fn count_presents(self) -> usize {
        self.iter().filter(|&f| f == Feedback::Present).count()
    }

    /// Parse a pattern from a string like "HPMHP", "GY-GY" or "🟩🟨⬜🟩🟨"
    ///
    /// Accepts:
    /// - 'H'/'G'/🟩 for Hit
    /// - 'P'/'Y'/🟨 for Present
    /// - 'M'/'-'/'_'/⬜ for Miss
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::Pattern;
    ///
    /// let p1 = Pattern::from_str("HP-HP").unwrap();
    /// let p2 = Pattern::from_str("🟩🟨⬜🟩🟨").unwrap();
    /// assert_eq!(p1, p2);
    /// ```
    #[must_use]
    #[allow(clippy::should_implement_trait)] // Option API; FromStr trait also implemented below
    pub fn from_str(s: &str) -> Option<Self> {
        let symbols = s
            .chars()
            .map(|ch| match ch {
                'H' | 'h' | 'G' | 'g' | '🟩' => Some(Feedback::Hit),
                'P' | 'p' | 'Y' | 'y' | '🟨' => Some(Feedback::Present),
                'M' | 'm' | '-' | '_' | '⬜' => Some(Feedback::Miss),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        if symbols.is_empty() || symbols.len() > MAX_WORD_LEN {
            return None;
        }

        Some(Self::from_feedback(&symbols))
    }

    /// Convert pattern to emoji string
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::Pattern;
    ///
    /// let p = Pattern::from_str("HPMHP").unwrap();
    /// assert_eq!(p.to_emoji(), "🟩🟨⬜🟩🟨");
    /// ```
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.iter()
            .map(|f| match f {
                Feedback::Hit => '🟩',
                Feedback::Present => '🟨',
                Feedback::Miss => '⬜',
            })
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in self.iter() {
            write!(f, "{}", symbol.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Pattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid pattern string: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(guess: &str, answer: &str) -> Pattern {
        Pattern::calculate(&Word::new(guess).unwrap(), &Word::new(answer).unwrap())
    }

    /// Expected (hits, hits + presents) per letter, computed from letter multisets
    /// independently of the two-pass engine.
    fn expected_counts(guess: &str, answer: &str) -> (usize, [usize; 26]) {
        let g = guess.as_bytes();
        let a = answer.as_bytes();
        let hits = g.iter().zip(a).filter(|(x, y)| x == y).count();
        let mut per_letter = [0usize; 26];
        for letter in b'a'..=b'z' {
            let in_guess = g.iter().filter(|&&c| c == letter).count();
            let in_answer = a.iter().filter(|&&c| c == letter).count();
            per_letter[letter_index(letter)] = in_guess.min(in_answer);
        }
        (hits, per_letter)
    }

    fn marked_per_letter(guess: &str, p: Pattern) -> [usize; 26] {
        let mut per_letter = [0usize; 26];
        for (ch, f) in guess.bytes().zip(p.iter()) {
            if f != Feedback::Miss {
                per_letter[letter_index(ch)] += 1;
            }
        }
        per_letter
    }

    #[test]
    fn perfect_pattern_values() {
        assert_eq!(Pattern::perfect(5).value(), 242);
        assert!(Pattern::perfect(5).is_perfect());
        assert_eq!(Pattern::perfect(5).count_hits(), 5);
        assert_eq!(Pattern::perfect(2).value(), 8);
        assert_eq!(pattern_count(5), 243);
    }

    #[test]
    fn all_hit_for_identical_words() {
        assert_eq!(pattern("abcde", "abcde").to_string(), "HHHHH");
        for word in ["crane", "slate", "audio", "zzzzz", "aaaaa", "ab", "q"] {
            let p = pattern(word, word);
            assert!(p.is_perfect(), "{word} vs itself should be all Hit");
            assert_eq!(p, Pattern::perfect(word.len()));
        }
    }

    #[test]
    fn reversed_word_keeps_middle_hit() {
        let p = pattern("abcde", "edcba");
        // 'c' sits in the middle of both, so it is a Hit
        assert_eq!(p.to_string(), "PPHPP");
    }

    #[test]
    fn no_positional_match_all_present() {
        // Every letter present elsewhere and no position shared
        let p = pattern("abcde", "eabcd");
        assert_eq!(p.to_string(), "PPPPP");
        assert_eq!(p.count_presents(), 5);
    }

    #[test]
    fn all_miss() {
        let p = pattern("abcde", "fghij");
        assert_eq!(p.value(), 0);
        assert_eq!(p.to_string(), "MMMMM");
    }

    #[test]
    fn repeated_letters_follow_multiset_rule() {
        let (guess, answer) = ("aabbb", "ababa");
        let p = pattern(guess, answer);
        let (hits, expected) = expected_counts(guess, answer);

        assert_eq!(p.count_hits(), hits);
        assert_eq!(marked_per_letter(guess, p), expected);
        // Ascending order in pass 2: the surplus 'b' at index 4 is the Miss
        assert_eq!(p.to_string(), "HPPHM");
    }

    #[test]
    fn duplicate_letters_hit_takes_priority() {
        // ROBOT vs FLOOR: first O present, second O hit
        let p = pattern("robot", "floor");
        assert_eq!(p.to_string(), "PPMHM");
    }

    #[test]
    fn duplicate_letters_surplus_in_guess() {
        // SPEED vs ERASE: both E present, answer has two
        assert_eq!(pattern("speed", "erase").to_string(), "PMPPM");
        // EERIE vs THEME: answer has two E, guess has three
        let p = pattern("eerie", "theme");
        assert_eq!(p.to_string(), "PMMMH");
    }

    #[test]
    fn letter_conservation_over_many_pairs() {
        let words = [
            "aabbb", "ababa", "speed", "erase", "robot", "floor", "eerie", "theme", "crane",
            "slate", "llama", "allay", "mamma", "maxim", "sissy", "sassy",
        ];
        for guess in words {
            for answer in words {
                let p = pattern(guess, answer);
                let (hits, expected) = expected_counts(guess, answer);
                assert_eq!(p.count_hits(), hits, "{guess} vs {answer}");
                assert_eq!(
                    marked_per_letter(guess, p),
                    expected,
                    "{guess} vs {answer} gave {p}"
                );
            }
        }
    }

    #[test]
    fn from_feedback_matches_calculate() {
        let p = Pattern::from_feedback(&[
            Feedback::Hit,
            Feedback::Present,
            Feedback::Present,
            Feedback::Hit,
            Feedback::Miss,
        ]);
        assert_eq!(p, pattern("aabbb", "ababa"));
        assert_eq!(p.get(1), Feedback::Present);
        assert_eq!(p.get(4), Feedback::Miss);
    }

    #[test]
    fn from_str_valid() {
        let p1 = Pattern::from_str("HPH--").unwrap();
        let p2 = Pattern::from_str("🟩🟨🟩⬜⬜").unwrap();
        let p3 = Pattern::from_str("gyg__").unwrap();
        let p4: Pattern = "HPHMM".parse().unwrap();

        assert_eq!(p1, p2);
        assert_eq!(p1, p3);
        assert_eq!(p1, p4);
        // H=2, P=1, H=2: 2 + 1×3 + 2×9 = 23
        assert_eq!(p1.value(), 23);
    }

    #[test]
    fn from_str_invalid() {
        assert!(Pattern::from_str("HPX").is_none());
        assert!(Pattern::from_str("").is_none());
        assert!(Pattern::from_str("HHHHHHHHHHH").is_none());
        assert!("HQ".parse::<Pattern>().is_err());
    }

    #[test]
    fn patterns_of_different_length_differ() {
        assert_ne!(Pattern::perfect(2), Pattern::new(8, 3));
    }
}
