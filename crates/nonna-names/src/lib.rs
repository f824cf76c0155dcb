//! Nonna Names
//!
//! Turns semi-structured scraped rows into canonical name lists.
//!
//! # Overview
//!
//! - **scrape**: Extract [`RawEntry`] rows from captioned HTML tables
//! - **normalize**: Classify each title and clean it into [`CanonicalName`]s
//! - **list**: Load and save name lists as JSON string arrays
//!
//! # Example
//!
//! ```rust
//! use nonna_names::normalize_title;
//!
//! let names = normalize_title("Scialatelli or scialatielli");
//! let names: Vec<&str> = names.iter().map(|n| n.as_str()).collect();
//! assert_eq!(names, vec!["Scialatelli", "scialatielli"]);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod list;
pub mod normalize;
pub mod scrape;
pub mod types;

// Re-exports
pub use error::{NameListError, ScrapeError};
pub use list::{load_name_list, save_name_list};
pub use normalize::{clean, classify, normalize_entries, normalize_title, TitleShape};
pub use scrape::{fetch_entries, parse_entries};
pub use types::{CanonicalName, CanonicalNameSet, RawEntry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building name sets
    pub use crate::{
        normalize_entries, normalize_title, CanonicalName, CanonicalNameSet, RawEntry,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
