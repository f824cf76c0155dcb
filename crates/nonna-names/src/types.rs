//! Name list data model

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One scraped table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Row title, possibly carrying alternates and footnote markers
    pub text: String,
    /// First link found in the row
    pub url: String,
}

impl RawEntry {
    /// Create new raw entry
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: url.into(),
        }
    }
}

/// Cleaned name: trimmed, no footnote markers, no parentheses, no leading `or `.
///
/// Only produced by [`crate::normalize::clean`], so every value upholds the
/// cleanup invariants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalName(String);

impl CanonicalName {
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Borrow as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for CanonicalName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identified, immutable collection of names
///
/// Cheap to clone; the names live behind an `Arc`. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalNameSet {
    id: String,
    names: Arc<[String]>,
}

impl CanonicalNameSet {
    /// Build a set from any sequence of names
    #[must_use]
    pub fn new<I, S>(id: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a set from normalizer output
    #[must_use]
    pub fn from_canonical(id: impl Into<String>, names: Vec<CanonicalName>) -> Self {
        Self::new(id, names.into_iter().map(CanonicalName::into_inner))
    }

    /// Set identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Names in insertion order
    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of names (duplicates included)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the set holds no names
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_set_keeps_duplicates_and_order() {
        let set = CanonicalNameSet::new("pastas", ["Gnocchi", "Anelli", "Gnocchi"]);
        assert_eq!(set.id(), "pastas");
        assert_eq!(set.len(), 3);
        assert_eq!(set.names()[2], "Gnocchi");
    }

    #[test]
    fn canonical_name_serializes_as_plain_string() {
        let name = CanonicalName::new_unchecked("Penne".to_string());
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Penne\"");
    }
}
