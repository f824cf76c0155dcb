//! Fixed-window rate limiter
//!
//! Each identity owns a counter and a window start. The window restarts on the
//! first request after it expires; it does not slide.

use crate::clock::{Clock, SystemClock};
use crate::error::LimiterError;
use crate::store::{MemoryStore, RateLimitRecord, RateLimitStore};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Limiter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window length in milliseconds
    pub window_ms: u64,
    /// Requests admitted per window
    pub max_requests: u32,
}

impl RateLimitConfig {
    /// Create config
    #[inline]
    #[must_use]
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_ms: 10_000,
            max_requests: 5,
        }
    }
}

/// Per-identity fixed-window rate limiter
///
/// Calls for the same identity are serialized through a per-identity async
/// mutex; distinct identities never wait on each other.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RateLimiter {
    /// Create limiter over a store, using real time
    #[must_use]
    pub fn new(config: RateLimitConfig, store: Arc<dyn RateLimitStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Create limiter with an explicit clock
    #[must_use]
    pub fn with_clock(
        config: RateLimitConfig,
        store: Arc<dyn RateLimitStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            locks: DashMap::new(),
        }
    }

    /// Create limiter over a fresh in-memory store
    #[must_use]
    pub fn in_memory(config: RateLimitConfig) -> Self {
        Self::new(config, Arc::new(MemoryStore::new()))
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Store key for an identity
    #[inline]
    #[must_use]
    pub fn key(identity: &str) -> String {
        format!("rateLimit:{identity}")
    }

    /// Decide whether a request from `identity` is admitted, recording it if so
    ///
    /// # Errors
    /// Returns `LimiterError::Store` if the store fails; nothing is recorded then.
    pub async fn admit(&self, identity: &str) -> Result<bool, LimiterError> {
        let lock = self
            .locks
            .entry(identity.to_string())
            .or_default()
            .clone();

        let admitted = {
            let _guard = lock.lock().await;
            self.admit_locked(identity).await
        };

        drop(lock);
        self.locks
            .remove_if(identity, |_, l| Arc::strong_count(l) == 1);

        admitted
    }

    async fn admit_locked(&self, identity: &str) -> Result<bool, LimiterError> {
        let key = Self::key(identity);
        let now = self.clock.now_ms();
        let window = i64::try_from(self.config.window_ms).unwrap_or(i64::MAX);

        let next = match self.store.get(&key).await? {
            None => RateLimitRecord::fresh(now),
            Some(record) if now.saturating_sub(record.window_start) > window => {
                tracing::debug!(%identity, "rate limit window expired, resetting");
                RateLimitRecord::fresh(now)
            }
            Some(record) if record.count < self.config.max_requests => RateLimitRecord {
                count: record.count + 1,
                window_start: record.window_start,
            },
            Some(record) => {
                tracing::warn!(%identity, count = record.count, "rate limit exceeded");
                return Ok(false);
            }
        };

        self.store.set(&key, next).await?;
        tracing::trace!(%identity, count = next.count, "request admitted");
        Ok(true)
    }

    /// Current record for an identity, if any
    ///
    /// # Errors
    /// Returns `LimiterError::Store` if the store fails
    pub async fn record(&self, identity: &str) -> Result<Option<RateLimitRecord>, LimiterError> {
        self.store.get(&Self::key(identity)).await
    }
}
