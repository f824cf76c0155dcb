//! Concurrency and property tests for the rate limiter.

use nonna_limiter::Clock;
use async_trait::async_trait;
use nonna_limiter::{
    LimiterError, ManualClock, MemoryStore, RateLimitConfig, RateLimitRecord, RateLimitStore,
    RateLimiter,
};
use proptest::prelude::*;
use std::sync::Arc;

/// Store that yields between every operation to widen race windows.
#[derive(Debug, Default)]
struct YieldingStore {
    inner: MemoryStore,
}

#[async_trait]
impl RateLimitStore for YieldingStore {
    async fn get(&self, key: &str) -> Result<Option<RateLimitRecord>, LimiterError> {
        tokio::task::yield_now().await;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, record: RateLimitRecord) -> Result<(), LimiterError> {
        tokio::task::yield_now().await;
        self.inner.set(key, record).await
    }
}

/// Store that always fails.
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl RateLimitStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<RateLimitRecord>, LimiterError> {
        Err(LimiterError::Store("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _record: RateLimitRecord) -> Result<(), LimiterError> {
        Err(LimiterError::Store("connection refused".to_string()))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_never_exceed_limit() {
    let limiter = Arc::new(RateLimiter::with_clock(
        RateLimitConfig::default(),
        Arc::new(YieldingStore::default()),
        Arc::new(ManualClock::new(0)),
    ));

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let limiter = limiter.clone();
            tokio::spawn(async move { limiter.admit("alice").await.unwrap() })
        })
        .collect();

    let admitted = futures::future::join_all(handles)
        .await
        .into_iter()
        .filter(|r| *r.as_ref().unwrap())
        .count();

    assert_eq!(admitted, 5);
    assert_eq!(limiter.record("alice").await.unwrap().unwrap().count, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn distinct_identities_each_get_full_quota() {
    let limiter = Arc::new(RateLimiter::with_clock(
        RateLimitConfig::new(10_000, 3),
        Arc::new(YieldingStore::default()),
        Arc::new(ManualClock::new(0)),
    ));

    let handles: Vec<_> = (0..40)
        .map(|i| {
            let limiter = limiter.clone();
            let who = format!("user{}", i % 4);
            tokio::spawn(async move { limiter.admit(&who).await.unwrap() })
        })
        .collect();

    let admitted = futures::future::join_all(handles)
        .await
        .into_iter()
        .filter(|r| *r.as_ref().unwrap())
        .count();

    assert_eq!(admitted, 12);
}

#[tokio::test]
async fn store_failure_propagates() {
    let limiter = RateLimiter::new(RateLimitConfig::default(), Arc::new(BrokenStore));
    let err = limiter.admit("alice").await.unwrap_err();
    assert_eq!(err, LimiterError::Store("connection refused".to_string()));
}

#[tokio::test]
async fn admits_again_after_window_and_resets_count() {
    let clock = Arc::new(ManualClock::new(0));
    let limiter = RateLimiter::with_clock(
        RateLimitConfig::default(),
        Arc::new(MemoryStore::new()),
        clock.clone(),
    );

    for _ in 0..5 {
        assert!(limiter.admit("u").await.unwrap());
    }
    assert!(!limiter.admit("u").await.unwrap());

    clock.advance(10_001);
    assert!(limiter.admit("u").await.unwrap());
    assert_eq!(limiter.record("u").await.unwrap().unwrap().count, 1);
}

proptest! {
    #[test]
    fn prop_count_never_exceeds_max(
        max in 1u32..8,
        steps in prop::collection::vec(0i64..4_000, 1..60),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let clock = Arc::new(ManualClock::new(0));
            let limiter = RateLimiter::with_clock(
                RateLimitConfig::new(10_000, max),
                Arc::new(MemoryStore::new()),
                clock.clone(),
            );

            for step in steps {
                clock.advance(step);
                let admitted = limiter.admit("p").await.unwrap();
                let record = limiter.record("p").await.unwrap().unwrap();
                assert!(record.count >= 1 && record.count <= max);
                assert!(clock.now_ms() - record.window_start <= 10_000 || !admitted);
            }
        });
    }
}
