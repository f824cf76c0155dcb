//! Error types for fuzzy matching

/// Fuzzy matcher errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FuzzyError {
    /// Requested set was never registered
    #[error("unknown fuzzy set: {0}")]
    UnknownSet(String),

    /// Two sets registered under one name
    #[error("duplicate fuzzy set: {0}")]
    DuplicateSet(String),
}
