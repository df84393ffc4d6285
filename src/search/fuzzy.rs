//! Term matchers
//!
//! A term matcher measures how well one query term occurs inside one field
//! value. The answer is a distance: 0.0 for an exact occurrence, 1.0 when
//! the term has nothing to do with the text. Both inputs are expected to be
//! normalized with [`normalize_for_matching`].

use nucleo_matcher::{Config, Matcher, Utf32String};
use std::sync::{Mutex, PoisonError};
use unicode_normalization::UnicodeNormalization;

/// Measures approximate occurrence of a term in a text
pub trait TermMatcher: Send + Sync {
    /// Distance in `0.0..=1.0`, lower is better
    fn distance(&self, haystack: &str, term: &str) -> f64;
}

/// Normalize text for matching
/// - Unicode NFC normalization
/// - lowercase
pub fn normalize_for_matching(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Approximate substring matching by edit distance.
///
/// The distance is the smallest number of insertions, deletions and
/// substitutions needed to turn the term into some substring of the
/// haystack, divided by the term length. Where the substring starts does not
/// matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceMatcher;

impl EditDistanceMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Check for exact substring match
    pub fn exact_match(&self, haystack: &str, term: &str) -> bool {
        !term.is_empty() && haystack.contains(term)
    }

    /// Fewest edits turning `needle` into a substring of `haystack`
    fn substring_edits(haystack: &[char], needle: &[char]) -> usize {
        let m = needle.len();
        // column[i]: edits aligning needle[..i] so that it ends at the
        // current haystack position; a match may start anywhere for free.
        let mut column: Vec<usize> = (0..=m).collect();
        let mut best = m;

        for &h in haystack {
            let mut diagonal = column[0];
            for i in 1..=m {
                let left = column[i];
                let cost = usize::from(needle[i - 1] != h);
                column[i] = (diagonal + cost).min(left + 1).min(column[i - 1] + 1);
                diagonal = left;
            }
            best = best.min(column[m]);
            if best == 0 {
                break;
            }
        }

        best
    }
}

impl TermMatcher for EditDistanceMatcher {
    fn distance(&self, haystack: &str, term: &str) -> f64 {
        if term.is_empty() {
            return 1.0;
        }
        if self.exact_match(haystack, term) {
            return 0.0;
        }

        let haystack: Vec<char> = haystack.chars().collect();
        let needle: Vec<char> = term.chars().collect();
        let edits = Self::substring_edits(&haystack, &needle);

        (edits as f64 / needle.len() as f64).min(1.0)
    }
}

/// Subsequence matching using nucleo-matcher (Smith-Waterman scoring, as
/// used in the Helix editor).
///
/// The nucleo score is compared with the score the term would get against
/// itself, so a clean word-boundary occurrence is distance 0.0 and scattered
/// characters drift towards 1.0.
pub struct SubsequenceMatcher {
    matcher: Mutex<Matcher>,
}

impl Default for SubsequenceMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsequenceMatcher {
    pub fn new() -> Self {
        Self::with_config(Config::DEFAULT)
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            matcher: Mutex::new(Matcher::new(config)),
        }
    }
}

impl TermMatcher for SubsequenceMatcher {
    fn distance(&self, haystack: &str, term: &str) -> f64 {
        if term.is_empty() {
            return 1.0;
        }

        let haystack_utf32 = Utf32String::from(haystack);
        let needle_utf32 = Utf32String::from(term);

        let mut matcher = self.matcher.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(score) = matcher.fuzzy_match(haystack_utf32.slice(..), needle_utf32.slice(..))
        else {
            return 1.0;
        };
        let ideal = matcher
            .fuzzy_match(needle_utf32.slice(..), needle_utf32.slice(..))
            .unwrap_or(score)
            .max(1);

        1.0 - (f64::from(score) / f64::from(ideal)).min(1.0)
    }
}
