//! Suggestion selection

use crate::set::MatchResult;

/// Default minimum score for a suggestion
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Turns raw matches into a suggestion string
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuggestionPolicy {
    /// Minimum score a candidate needs to be suggested
    pub min_score: f64,
}

impl SuggestionPolicy {
    /// Create policy with a minimum score
    #[inline]
    #[must_use]
    pub fn new(min_score: f64) -> Self {
        Self { min_score }
    }

    /// Select a suggestion from one set's matches
    ///
    /// An exact match anywhere at the top suppresses the suggestion entirely.
    /// Otherwise candidates at or above `min_score` are ranked best first,
    /// capitalized and joined with `", "`. Empty means nothing worth suggesting.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn select(&self, matches: &[MatchResult]) -> String {
        let top = matches
            .iter()
            .map(|m| m.score)
            .fold(f64::NEG_INFINITY, f64::max);
        if top == 1.0 {
            return String::new();
        }

        let mut kept: Vec<&MatchResult> =
            matches.iter().filter(|m| m.score >= self.min_score).collect();
        kept.sort_by(|a, b| b.score.total_cmp(&a.score));

        kept.iter()
            .map(|m| capitalize(&m.value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for SuggestionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_SCORE)
    }
}

/// Uppercase the first character
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
