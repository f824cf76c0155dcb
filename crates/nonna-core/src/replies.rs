//! Fixed user-visible replies and trigger shortcuts

use crate::types::{ResolutionOutcome, Shortcut};

/// Sent when the knowledge source has no entry
pub const NOT_FOUND: &str = "Mama mia, Nonna cannot find that!";

/// Sent when the lookup failed for any other reason
pub const LOOKUP_FAILED: &str = "Oof marone, that request was too spicy and Nonna had an error!";

/// Sent when the answer mentions filtered terms
pub const CONTENT_REJECTED: &str = "Nonna says you need to include pasta only!";

/// Trigger phrases, checked in order against the normalized query
pub const SHORTCUTS: [Shortcut; 2] = [
    Shortcut {
        phrase: "taylor ham",
        emoji: "🤌",
        media_url: "https://tenor.com/view/soprano-smile-happy-gif-14831229",
    },
    Shortcut {
        phrase: "pork roll",
        emoji: "🖕",
        media_url: "https://tenor.com/view/sopranos-paulie-gualtieri-happy-smile-lol-gif-16139758",
    },
];

/// "Did you mean" reply
#[must_use]
pub fn suggestion(list: &str) -> String {
    format!("Nonna asks if you meant any of the following: {list}?")
}

/// Rate limit warning addressed to `identity`
#[must_use]
pub fn rate_limited(identity: &str) -> String {
    format!(
        "Nonna demands you slow down with your requests {identity}, or she can't serve pasta to everyone!"
    )
}

/// First shortcut whose phrase occurs in `query`
#[must_use]
pub fn find_shortcut(query: &str) -> Option<Shortcut> {
    SHORTCUTS.iter().find(|s| query.contains(s.phrase)).copied()
}

impl ResolutionOutcome {
    /// Text sent to the platform for this outcome, if any
    ///
    /// Shortcuts answer with their media link.
    #[must_use]
    pub fn reply_text(&self) -> Option<String> {
        match self {
            Self::Skipped(_) => None,
            Self::Shortcut(shortcut) => Some(shortcut.media_url.to_string()),
            Self::Suggestion(list) => Some(suggestion(list)),
            Self::RateLimited { identity } => Some(rate_limited(identity)),
            Self::LookupNotFound => Some(NOT_FOUND.to_string()),
            Self::LookupFailed => Some(LOOKUP_FAILED.to_string()),
            Self::ContentRejected => Some(CONTENT_REJECTED.to_string()),
            Self::Answer(text) => Some(text.clone()),
        }
    }
}
