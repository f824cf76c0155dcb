//! Error types for Nonna Core
//!
//! Provides error handling for:
//! - Configuration loading and validation
//! - Startup context construction
//! - Knowledge lookup client setup
//! - Outbound message delivery
//! - Interaction webhook verification
//!
//! Per-query failures never surface as these errors: the orchestrator folds
//! them into a [`crate::ResolutionOutcome`].

use nonna_fuzzy::FuzzyError;
use nonna_names::NameListError;
use std::path::PathBuf;

/// Main startup error type
#[derive(Debug, thiserror::Error)]
pub enum NonnaError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Name list could not be loaded
    #[error("name list error: {0}")]
    NameList(#[from] NameListError),

    /// Fuzzy sets are inconsistent with the configuration
    #[error("fuzzy set error: {0}")]
    Fuzzy(#[from] FuzzyError),

    /// Lookup client could not be built
    #[error("lookup client error: {0}")]
    Lookup(#[from] LookupError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extension is not toml, yaml, yml or json
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// File did not parse
    #[error("cannot parse config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A value is out of range
    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Knowledge lookup client errors
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// HTTP client could not be built
    #[error("http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Outbound message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessengerError {
    /// Target channel or message is gone
    #[error("delivery target not found: {0}")]
    TargetNotFound(String),

    /// Platform rejected or dropped the message
    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Interaction webhook errors
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    /// Signature or timestamp header missing
    #[error("missing signature headers")]
    MissingHeaders,

    /// Configured public key is not a valid Ed25519 key
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature header is not 64 hex-encoded bytes
    #[error("malformed signature")]
    MalformedSignature,

    /// Signature does not match the body
    #[error("bad request signature")]
    BadSignature,

    /// Body is not an interaction
    #[error("malformed interaction body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl InteractionError {
    /// Whether the request should be answered with 401
    #[inline]
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::MissingHeaders | Self::MalformedSignature | Self::BadSignature
        )
    }
}
