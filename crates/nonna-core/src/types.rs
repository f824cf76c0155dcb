//! Core types for the resolution pipeline
//!
//! Defines:
//! - Platform identifiers
//! - Inbound query events
//! - The terminal outcome of each query

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Platform channel identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    /// Create channel id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform message identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(pub String);

impl MessageId {
    /// Create message id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-query trace identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QueryId(pub Ulid);

impl QueryId {
    /// Generate new query ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for QueryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QueryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEvent {
    /// Message being answered
    pub message_id: MessageId,
    /// Author identity, used for rate limiting
    pub identity: String,
    /// Channel the message arrived in
    pub channel_id: ChannelId,
    /// Raw message text
    pub text: String,
    /// Whether the author is a bot
    pub is_automated_author: bool,
}

impl QueryEvent {
    /// Create a human-authored event
    #[must_use]
    pub fn new(
        message_id: impl Into<String>,
        identity: impl Into<String>,
        channel_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            message_id: MessageId::new(message_id),
            identity: identity.into(),
            channel_id: ChannelId::new(channel_id),
            text: text.into(),
            is_automated_author: false,
        }
    }

    /// Mark as bot-authored
    #[inline]
    #[must_use]
    pub fn automated(mut self) -> Self {
        self.is_automated_author = true;
        self
    }
}

/// Why a query was skipped without a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Author is a bot
    AutomatedAuthor,
    /// Channel is not in the allow-list
    ChannelNotAllowed,
    /// Text has no `((term))`
    NoPattern,
}

/// Canned reaction for a trigger phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    /// Phrase looked for in the normalized query
    pub phrase: &'static str,
    /// Reaction added to the message
    pub emoji: &'static str,
    /// Media link sent to the channel
    pub media_url: &'static str,
}

/// Terminal outcome of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Not for us; nothing is sent
    Skipped(SkipReason),
    /// Trigger phrase matched
    Shortcut(Shortcut),
    /// Close but inexact names, already formatted as a list
    Suggestion(String),
    /// Identity exceeded its quota
    RateLimited {
        /// Identity the warning is addressed to
        identity: String,
    },
    /// Knowledge source has no entry
    LookupNotFound,
    /// Transport error, unexpected status, or any other failure
    LookupFailed,
    /// Answer mentioned filtered terms
    ContentRejected,
    /// Filtered answer text
    Answer(String),
}

impl ResolutionOutcome {
    /// Stable label for logs and metrics
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Skipped(_) => "skipped",
            Self::Shortcut(_) => "shortcut",
            Self::Suggestion(_) => "suggestion",
            Self::RateLimited { .. } => "rate_limited",
            Self::LookupNotFound => "lookup_not_found",
            Self::LookupFailed => "lookup_failed",
            Self::ContentRejected => "content_rejected",
            Self::Answer(_) => "answer",
        }
    }

    /// Whether the query was answered from the knowledge source
    #[inline]
    #[must_use]
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }
}
