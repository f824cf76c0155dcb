//! Named fuzzy sets
//!
//! [`FuzzyMatcher`] is built once and only read afterwards, so it can be
//! shared behind an `Arc` without locking.

use crate::error::FuzzyError;
use crate::policy::SuggestionPolicy;
use crate::set::{FuzzySet, MatchResult};
use indexmap::IndexMap;
use nonna_names::CanonicalNameSet;

/// Immutable registry of fuzzy sets keyed by set id
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatcher {
    sets: IndexMap<String, FuzzySet>,
}

/// Builder for [`FuzzyMatcher`]
#[derive(Debug, Default)]
pub struct FuzzyMatcherBuilder {
    sets: IndexMap<String, FuzzySet>,
}

impl FuzzyMatcherBuilder {
    /// Add a set
    ///
    /// # Errors
    /// Returns `FuzzyError::DuplicateSet` if the id is already taken
    pub fn add(mut self, set: &CanonicalNameSet) -> Result<Self, FuzzyError> {
        if self.sets.contains_key(set.id()) {
            return Err(FuzzyError::DuplicateSet(set.id().to_string()));
        }
        self.sets.insert(set.id().to_string(), FuzzySet::build(set));
        Ok(self)
    }

    /// Freeze into a matcher
    #[must_use]
    pub fn build(self) -> FuzzyMatcher {
        FuzzyMatcher { sets: self.sets }
    }
}

impl FuzzyMatcher {
    /// Start building a matcher
    #[inline]
    #[must_use]
    pub fn builder() -> FuzzyMatcherBuilder {
        FuzzyMatcherBuilder::default()
    }

    /// Look up a set by id
    #[inline]
    #[must_use]
    pub fn set(&self, id: &str) -> Option<&FuzzySet> {
        self.sets.get(id)
    }

    /// Registered set ids
    pub fn set_ids(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    /// Check that every id names a registered set
    ///
    /// # Errors
    /// Returns `FuzzyError::UnknownSet` for the first missing id
    pub fn ensure_sets<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), FuzzyError> {
        match ids.iter().find(|id| !self.sets.contains_key(id.as_ref())) {
            Some(missing) => Err(FuzzyError::UnknownSet(missing.as_ref().to_string())),
            None => Ok(()),
        }
    }

    /// Raw matches for each requested set, in request order
    ///
    /// # Errors
    /// Returns `FuzzyError::UnknownSet` if any requested set is missing
    pub fn query<S: AsRef<str>>(
        &self,
        text: &str,
        ids: &[S],
    ) -> Result<IndexMap<String, Vec<MatchResult>>, FuzzyError> {
        self.ensure_sets(ids)?;
        Ok(ids
            .iter()
            .filter_map(|id| self.sets.get(id.as_ref()))
            .map(|set| (set.id().to_string(), set.get(text)))
            .collect())
    }

    /// Suggestion string for each requested set, in request order
    ///
    /// Empty strings mean the set had nothing worth suggesting.
    ///
    /// # Errors
    /// Returns `FuzzyError::UnknownSet` if any requested set is missing
    pub fn suggestions<S: AsRef<str>>(
        &self,
        text: &str,
        ids: &[S],
        policy: &SuggestionPolicy,
    ) -> Result<IndexMap<String, String>, FuzzyError> {
        let raw = self.query(text, ids)?;
        Ok(raw
            .into_iter()
            .map(|(id, matches)| {
                let suggestion = policy.select(&matches);
                tracing::debug!(set = %id, %suggestion, "fuzzy suggestion");
                (id, suggestion)
            })
            .collect())
    }
}
