//! Long-lived bot state
//!
//! [`BotContext`] is built once when the platform session is ready and shared
//! read-only by every query. Fuzzy sets never change after construction; the
//! rate limit store is the only mutable state.

use crate::config::{NonnaConfig, StoreConfig, StoreKind, MEME_SET, PASTA_SET};
use crate::error::NonnaError;
use crate::filter::ContentFilter;
use crate::lookup::{HttpKnowledgeLookup, KnowledgeLookup};
use crate::platform::ChannelAllowList;
use nonna_fuzzy::{FuzzyMatcher, SuggestionPolicy};
use nonna_limiter::{ExpiringStore, MemoryStore, RateLimitStore, RateLimiter};
use nonna_names::{load_name_list, CanonicalNameSet};
use std::sync::Arc;
use std::time::Duration;

/// Shared state for query resolution
#[derive(Clone)]
pub struct BotContext {
    /// Configuration the context was built from
    pub config: NonnaConfig,
    /// Build-once fuzzy sets
    pub matcher: Arc<FuzzyMatcher>,
    /// Per-identity rate limiter
    pub limiter: Arc<RateLimiter>,
    /// Answer filter
    pub filter: Arc<ContentFilter>,
    /// Knowledge source
    pub lookup: Arc<dyn KnowledgeLookup>,
    /// Channels answered in
    pub allow_list: ChannelAllowList,
}

impl std::fmt::Debug for BotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotContext")
            .field("config", &self.config)
            .field("sets", &self.matcher.set_ids().collect::<Vec<_>>())
            .field("filter_terms", &self.filter.len())
            .field("allow_list", &self.allow_list.len())
            .finish_non_exhaustive()
    }
}

impl BotContext {
    /// Load name lists and assemble the context
    ///
    /// # Errors
    /// - `NonnaError::Config` if the configuration is invalid
    /// - `NonnaError::NameList` if a list file cannot be read
    /// - `NonnaError::Fuzzy` if a default set has no list
    pub fn build(
        config: NonnaConfig,
        lookup: Arc<dyn KnowledgeLookup>,
        allow_list: ChannelAllowList,
    ) -> Result<Self, NonnaError> {
        config.validate()?;

        let mut builder = FuzzyMatcher::builder().add(&CanonicalNameSet::new(
            PASTA_SET,
            load_name_list(&config.lists.pastas)?,
        ))?;
        if let Some(memes) = &config.lists.memes {
            builder = builder.add(&CanonicalNameSet::new(MEME_SET, load_name_list(memes)?))?;
        }
        let matcher = builder.build();

        let filter = ContentFilter::new(load_name_list(&config.lists.food)?);
        let limiter = RateLimiter::new(config.rate_limit, store_for(&config.store));

        let context = Self::from_parts(config, matcher, limiter, filter, lookup, allow_list)?;
        tracing::info!(?context, "bot context ready");
        Ok(context)
    }

    /// Build with the HTTP knowledge source from the configuration
    ///
    /// # Errors
    /// As [`BotContext::build`], plus `NonnaError::Lookup` if the HTTP client
    /// cannot be built
    pub fn with_http_lookup(
        config: NonnaConfig,
        allow_list: ChannelAllowList,
    ) -> Result<Self, NonnaError> {
        let lookup = HttpKnowledgeLookup::new(&config.lookup)?;
        Self::build(config, Arc::new(lookup), allow_list)
    }

    /// Assemble from prepared parts
    ///
    /// # Errors
    /// Returns `NonnaError::Fuzzy` if a configured default set is missing
    /// from `matcher`
    pub fn from_parts(
        config: NonnaConfig,
        matcher: FuzzyMatcher,
        limiter: RateLimiter,
        filter: ContentFilter,
        lookup: Arc<dyn KnowledgeLookup>,
        allow_list: ChannelAllowList,
    ) -> Result<Self, NonnaError> {
        matcher.ensure_sets(&config.fuzzy.default_sets)?;
        Ok(Self {
            config,
            matcher: Arc::new(matcher),
            limiter: Arc::new(limiter),
            filter: Arc::new(filter),
            lookup,
            allow_list,
        })
    }

    /// Suggestion policy from the configuration
    #[inline]
    #[must_use]
    pub fn policy(&self) -> SuggestionPolicy {
        SuggestionPolicy::new(self.config.fuzzy.min_score)
    }
}

fn store_for(config: &StoreConfig) -> Arc<dyn RateLimitStore> {
    match config.kind {
        StoreKind::Memory => Arc::new(MemoryStore::new()),
        StoreKind::Expiring => Arc::new(ExpiringStore::new(
            config.max_capacity,
            Duration::from_secs(config.idle_secs),
        )),
    }
}
