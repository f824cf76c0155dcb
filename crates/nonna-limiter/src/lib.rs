//! Nonna Limiter
//!
//! Per-identity fixed-window rate limiting.
//!
//! # Semantics
//!
//! With window `W` and limit `N`:
//! - no record: start a window with count 1, admit
//! - window expired (`now - start > W`): restart it with count 1, admit
//! - inside the window with `count < N`: increment, admit
//! - otherwise: deny and leave the record alone
//!
//! # Example
//!
//! ```rust
//! use nonna_limiter::{RateLimitConfig, RateLimiter};
//!
//! # async fn example() -> Result<(), nonna_limiter::LimiterError> {
//! let limiter = RateLimiter::in_memory(RateLimitConfig::new(10_000, 5));
//! assert!(limiter.admit("alice").await?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod clock;
pub mod error;
pub mod limiter;
pub mod store;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::LimiterError;
pub use limiter::{RateLimitConfig, RateLimiter};
pub use store::{ExpiringStore, MemoryStore, RateLimitRecord, RateLimitStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
