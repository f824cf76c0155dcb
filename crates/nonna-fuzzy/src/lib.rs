//! Nonna Fuzzy
//!
//! Approximate matching against immutable, named name sets.
//!
//! # Overview
//!
//! - **FuzzySet**: One case-folded set scored by normalized edit distance
//! - **FuzzyMatcher**: Build-once registry of sets, queried by id
//! - **SuggestionPolicy**: Turns raw matches into a "did you mean" string
//!
//! # Example
//!
//! ```rust
//! use nonna_fuzzy::{FuzzyMatcher, SuggestionPolicy};
//! use nonna_names::CanonicalNameSet;
//!
//! let matcher = FuzzyMatcher::builder()
//!     .add(&CanonicalNameSet::new("pastas", ["Spaghetti", "Penne"]))
//!     .unwrap()
//!     .build();
//!
//! let suggestions = matcher
//!     .suggestions("spagetti", &["pastas"], &SuggestionPolicy::default())
//!     .unwrap();
//! assert_eq!(suggestions["pastas"], "Spaghetti");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod policy;
pub mod set;

// Re-exports
pub use error::FuzzyError;
pub use matcher::{FuzzyMatcher, FuzzyMatcherBuilder};
pub use policy::{capitalize, SuggestionPolicy, DEFAULT_MIN_SCORE};
pub use set::{FuzzySet, MatchResult, RAW_SCORE_FLOOR};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
