//! Rate limit record stores
//!
//! The limiter only needs `get` and `set`; serialization of the
//! read-modify-write lives in [`crate::RateLimiter`], so a store does not have
//! to provide compare-and-swap.

use crate::error::LimiterError;
use async_trait::async_trait;
use dashmap::DashMap;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-identity counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitRecord {
    /// Requests admitted in the current window, at least 1
    pub count: u32,
    /// Window start in epoch milliseconds
    #[serde(rename = "lastRequestTime")]
    pub window_start: i64,
}

impl RateLimitRecord {
    /// First request of a fresh window
    #[inline]
    #[must_use]
    pub fn fresh(now_ms: i64) -> Self {
        Self {
            count: 1,
            window_start: now_ms,
        }
    }
}

/// Key-value store for rate limit records
#[async_trait]
pub trait RateLimitStore: Send + Sync + std::fmt::Debug {
    /// Read a record
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, LimiterError>;

    /// Write a record
    async fn set(&self, key: &str, record: RateLimitRecord) -> Result<(), LimiterError>;
}

/// In-process store backed by a concurrent map; records never expire
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<String, RateLimitRecord>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, LimiterError> {
        Ok(self.records.get(key).map(|r| *r))
    }

    async fn set(&self, key: &str, record: RateLimitRecord) -> Result<(), LimiterError> {
        self.records.insert(key.to_string(), record);
        Ok(())
    }
}

/// In-process store that evicts idle identities
///
/// Backed by moka. An evicted record behaves exactly like an expired window,
/// so the idle timeout should be at least the rate limit window.
#[derive(Debug, Clone)]
pub struct ExpiringStore {
    inner: Cache<String, RateLimitRecord>,
}

impl ExpiringStore {
    /// Create store with max capacity and idle timeout
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64, time_to_idle: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_idle(time_to_idle)
                .build(),
        }
    }

    /// Get approximate entry count
    #[inline]
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

#[async_trait]
impl RateLimitStore for ExpiringStore {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, LimiterError> {
        Ok(self.inner.get(key).await)
    }

    async fn set(&self, key: &str, record: RateLimitRecord) -> Result<(), LimiterError> {
        self.inner.insert(key.to_string(), record).await;
        Ok(())
    }
}
