//! Searchable fuzzy set
//!
//! Scores are normalized Levenshtein similarity: `1 - distance / max_len`.
//! Identical strings score exactly `1.0` and the score falls as the edit
//! distance grows.

use nonna_names::CanonicalNameSet;
use std::collections::HashSet;

/// Matches scoring below this never leave the set
pub const RAW_SCORE_FLOOR: f64 = 0.33;

/// Scored candidate
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Similarity in `[0, 1]`
    pub score: f64,
    /// Case-folded member
    pub value: String,
}

impl MatchResult {
    /// Whether this is an identical match
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_exact(&self) -> bool {
        self.score == 1.0
    }
}

/// Immutable, case-folded fuzzy set
///
/// Members are folded to lowercase and repeated members collapse onto their
/// first occurrence, which also fixes the tie-break order.
#[derive(Debug, Clone)]
pub struct FuzzySet {
    id: String,
    members: Vec<String>,
}

impl FuzzySet {
    /// Build from a canonical name set
    #[must_use]
    pub fn build(set: &CanonicalNameSet) -> Self {
        let mut seen = HashSet::with_capacity(set.len());
        let members: Vec<String> = set
            .names()
            .iter()
            .map(|name| name.to_lowercase())
            .filter(|name| seen.insert(name.clone()))
            .collect();

        tracing::debug!(set = set.id(), members = members.len(), "built fuzzy set");
        Self {
            id: set.id().to_string(),
            members,
        }
    }

    /// Set identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Distinct members in insertion order
    #[inline]
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Whether the folded text is a member
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        let folded = text.to_lowercase();
        self.members.iter().any(|m| *m == folded)
    }

    /// Score every member against `text`
    ///
    /// Returns matches at or above [`RAW_SCORE_FLOOR`], best first; equal scores
    /// keep insertion order.
    #[must_use]
    pub fn get(&self, text: &str) -> Vec<MatchResult> {
        let folded = text.to_lowercase();
        let mut matches: Vec<MatchResult> = self
            .members
            .iter()
            .map(|member| MatchResult {
                score: strsim::normalized_levenshtein(&folded, member),
                value: member.clone(),
            })
            .filter(|m| m.score >= RAW_SCORE_FLOOR)
            .collect();

        // stable: ties stay in insertion order
        matches.sort_by(|a, b| b.score.total_cmp(&a.score));
        matches
    }
}
