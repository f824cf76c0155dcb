//! Knowledge source lookup
//!
//! One GET per query against a page-summary endpoint. Every failure mode is
//! folded into [`LookupOutcome`] so the orchestrator matches on a value.

use crate::config::LookupConfig;
use crate::error::LookupError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Description marking a disambiguation page
pub const DISAMBIGUATION_SENTINEL: &str = "Topics referred to by the same term";

/// Result of a single lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// Source has no entry for the term
    NotFound,
    /// Transport error, unexpected status, or unparsable body
    Failed(String),
    /// Summary found
    Found(SummaryPayload),
}

/// Page summary returned by the knowledge source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPayload {
    /// Lead image
    pub thumbnail: Option<Thumbnail>,
    /// Short description
    pub description: Option<String>,
    /// Plain-text extract
    pub extract: Option<String>,
    /// Canonical page links
    pub content_urls: Option<ContentUrls>,
}

/// Lead image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thumbnail {
    /// Image URL
    pub source: Option<String>,
}

/// Desktop and mobile page links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentUrls {
    /// Desktop site
    pub desktop: Option<PageUrl>,
    /// Mobile site
    pub mobile: Option<PageUrl>,
}

/// A single page link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageUrl {
    /// Page URL
    pub page: Option<String>,
}

impl SummaryPayload {
    /// Whether the summary describes a disambiguation page
    #[must_use]
    pub fn is_disambiguation(&self) -> bool {
        self.description.as_deref() == Some(DISAMBIGUATION_SENTINEL)
    }

    /// Render the answer text
    ///
    /// Disambiguation pages have their description and extract replaced by the
    /// desktop and mobile page links. Present parts are joined by a blank line.
    #[must_use]
    pub fn compose(&self) -> String {
        let (description, extract) = if self.is_disambiguation() {
            let urls = self.content_urls.as_ref();
            (
                urls.and_then(|u| u.desktop.as_ref())
                    .and_then(|p| p.page.as_deref()),
                urls.and_then(|u| u.mobile.as_ref())
                    .and_then(|p| p.page.as_deref()),
            )
        } else {
            (self.description.as_deref(), self.extract.as_deref())
        };

        [
            self.thumbnail.as_ref().and_then(|t| t.source.as_deref()),
            description,
            extract,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
    }
}

/// Knowledge source seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KnowledgeLookup: Send + Sync {
    /// Look up a normalized term
    async fn lookup(&self, term: &str) -> LookupOutcome;
}

/// HTTP page-summary client
#[derive(Debug, Clone)]
pub struct HttpKnowledgeLookup {
    http: Client,
    base_url: String,
}

impl HttpKnowledgeLookup {
    /// Build client from configuration
    ///
    /// # Errors
    /// Returns `LookupError::Client` if the HTTP client cannot be built
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Request URL for a term
    #[must_use]
    pub fn url_for(&self, term: &str) -> String {
        format!(
            "{}/{}?redirect=true",
            self.base_url,
            urlencoding::encode(term)
        )
    }
}

#[async_trait]
impl KnowledgeLookup for HttpKnowledgeLookup {
    async fn lookup(&self, term: &str) -> LookupOutcome {
        let url = self.url_for(term);
        tracing::debug!(%url, "knowledge lookup");

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%term, error = %e, "lookup request failed");
                return LookupOutcome::Failed(e.to_string());
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::info!(%term, "lookup found nothing");
            return LookupOutcome::NotFound;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%term, status = status.as_u16(), %body, "lookup returned error status");
            return LookupOutcome::Failed(format!("status {status}"));
        }

        match response.json::<SummaryPayload>().await {
            Ok(payload) => LookupOutcome::Found(payload),
            Err(e) => {
                tracing::error!(%term, error = %e, "lookup body did not parse");
                LookupOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(url: &str) -> Option<PageUrl> {
        Some(PageUrl {
            page: Some(url.to_string()),
        })
    }

    #[test]
    fn compose_joins_present_parts() {
        let payload = SummaryPayload {
            thumbnail: Some(Thumbnail {
                source: Some("https://img/penne.jpg".to_string()),
            }),
            description: Some("Pasta".to_string()),
            extract: Some("Penne is an extruded type of pasta.".to_string()),
            content_urls: None,
        };
        assert_eq!(
            payload.compose(),
            "https://img/penne.jpg\n\nPasta\n\nPenne is an extruded type of pasta."
        );
    }

    #[test]
    fn compose_skips_missing_thumbnail() {
        let payload = SummaryPayload {
            description: Some("Pasta".to_string()),
            extract: Some("Long noodles.".to_string()),
            ..SummaryPayload::default()
        };
        assert_eq!(payload.compose(), "Pasta\n\nLong noodles.");
    }

    #[test]
    fn disambiguation_uses_page_links() {
        let payload = SummaryPayload {
            thumbnail: None,
            description: Some(DISAMBIGUATION_SENTINEL.to_string()),
            extract: Some("Rigatoni may refer to:".to_string()),
            content_urls: Some(ContentUrls {
                desktop: page("https://en.wikipedia.org/wiki/Rigatoni"),
                mobile: page("https://en.m.wikipedia.org/wiki/Rigatoni"),
            }),
        };
        assert!(payload.is_disambiguation());
        assert_eq!(
            payload.compose(),
            "https://en.wikipedia.org/wiki/Rigatoni\n\nhttps://en.m.wikipedia.org/wiki/Rigatoni"
        );
    }

    #[test]
    fn payload_parses_with_missing_fields() {
        let payload: SummaryPayload =
            serde_json::from_str(r#"{"extract": "Only text", "type": "standard"}"#).unwrap();
        assert_eq!(payload.compose(), "Only text");
    }

    #[test]
    fn thumbnail_without_source_still_parses() {
        let payload: SummaryPayload = serde_json::from_str(
            r#"{"thumbnail":{"width":320,"height":200},"description":"Pasta","extract":"Tubes."}"#,
        )
        .unwrap();
        assert_eq!(payload.thumbnail, Some(Thumbnail::default()));
        assert_eq!(payload.compose(), "Pasta\n\nTubes.");
    }

    #[test]
    fn disambiguation_without_desktop_page_keeps_mobile_link() {
        let payload: SummaryPayload = serde_json::from_str(
            r#"{
                "description": "Topics referred to by the same term",
                "extract": "Ziti may refer to:",
                "content_urls": {
                    "desktop": {"revisions": "https://en.wikipedia.org/wiki/Ziti?action=history"},
                    "mobile": {"page": "https://en.m.wikipedia.org/wiki/Ziti"}
                }
            }"#,
        )
        .unwrap();
        assert!(payload.is_disambiguation());
        assert_eq!(payload.compose(), "https://en.m.wikipedia.org/wiki/Ziti");
    }

    #[test]
    fn url_encodes_term() {
        let lookup = HttpKnowledgeLookup::new(&LookupConfig {
            base_url: "http://localhost/summary/".to_string(),
            ..LookupConfig::default()
        })
        .unwrap();
        assert_eq!(
            lookup.url_for("cacio e pepe"),
            "http://localhost/summary/cacio%20e%20pepe?redirect=true"
        );
    }
}
