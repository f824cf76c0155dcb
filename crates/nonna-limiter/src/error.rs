//! Error types for rate limiting

/// Rate limiter errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LimiterError {
    /// Backing store failed
    #[error("rate limit store error: {0}")]
    Store(String),
}
