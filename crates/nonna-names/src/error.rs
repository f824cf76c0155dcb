//! Error types for name lists

use std::path::PathBuf;

/// Name list file errors
#[derive(Debug, thiserror::Error)]
pub enum NameListError {
    /// File could not be read or written
    #[error("name list io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not a JSON array of strings
    #[error("malformed name list {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// List page scraping errors
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Transport failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Invalid CSS selector
    #[error("invalid selector: {0}")]
    Selector(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ScrapeError::Status {
            status: 503,
            url: "http://x".to_string(),
        };
        assert_eq!(err.to_string(), "unexpected status 503 from http://x");
    }
}
