//! Nonna Core - query resolution for the pasta bot
//!
//! Turns a chat message containing `((term))` into exactly one outcome:
//! - Shortcut reactions for a couple of trigger phrases
//! - "Did you mean" suggestions from the fuzzy name sets
//! - A rate limit warning per identity
//! - A filtered summary from the knowledge source, or a fixed error reply
//!
//! # Example
//!
//! ```rust,ignore
//! use nonna_core::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(messenger: &dyn Messenger) -> Result<(), Box<dyn std::error::Error>> {
//! let config = NonnaConfig::load("nonna.toml")?;
//! let context = BotContext::with_http_lookup(config, ChannelAllowList::from_ids(["general"]))?;
//! let orchestrator = Orchestrator::new(Arc::new(context));
//!
//! let event = QueryEvent::new("m1", "alice", "general", "((bucatini))");
//! let outcome = orchestrator.handle(&event, messenger).await?;
//! println!("{}", outcome.label());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod interaction;
pub mod lookup;
pub mod orchestrator;
pub mod platform;
pub mod replies;
pub mod types;

// Re-exports for convenience
pub use config::{
    AcknowledgeConfig, ChannelConfig, FuzzyConfig, ListPaths, LookupConfig, NonnaConfig,
    StoreConfig, StoreKind, MEME_SET, PASTA_SET,
};
pub use context::BotContext;
pub use error::{ConfigError, InteractionError, LookupError, MessengerError, NonnaError};
pub use filter::ContentFilter;
pub use interaction::{Interaction, InteractionReply, InteractionVerifier};
pub use lookup::{
    ContentUrls, HttpKnowledgeLookup, KnowledgeLookup, LookupOutcome, PageUrl, SummaryPayload,
    Thumbnail, DISAMBIGUATION_SENTINEL,
};
pub use orchestrator::{extract_query, Orchestrator};
pub use platform::{ChannelAllowList, ChannelInfo, Messenger};
pub use types::{
    ChannelId, MessageId, QueryEvent, QueryId, ResolutionOutcome, Shortcut, SkipReason,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the bot
    pub use crate::{
        BotContext, ChannelAllowList, KnowledgeLookup, LookupOutcome, Messenger, NonnaConfig,
        Orchestrator, QueryEvent, ResolutionOutcome,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
