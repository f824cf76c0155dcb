//! Reference term content filter

/// Counts reference terms occurring in text
///
/// Matching is case-insensitive substring search; terms are only case folded.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    /// Create filter from reference terms
    ///
    /// Empty terms are dropped, since they would match any text.
    #[must_use]
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: terms
                .into_iter()
                .map(|t| t.as_ref().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// Terms found in `text`
    #[must_use]
    pub fn matches<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let haystack = text.to_lowercase();
        self.terms
            .iter()
            .filter(|term| haystack.contains(term.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Number of reference terms found in `text`
    #[must_use]
    pub fn score(&self, text: &str) -> usize {
        self.matches(text).len()
    }

    /// Whether `text` must be refused
    #[must_use]
    pub fn is_rejected(&self, text: &str) -> bool {
        let found = self.matches(text);
        if !found.is_empty() {
            tracing::info!(terms = %found.join(", "), "content filter triggered");
        }
        !found.is_empty()
    }

    /// Number of reference terms
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether there are no reference terms
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
