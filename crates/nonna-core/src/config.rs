//! Nonna configuration
//!
//! Loaded from TOML, YAML or JSON (picked by file extension). Every section has
//! defaults, so an empty file is a valid configuration.

use crate::error::ConfigError;
use nonna_fuzzy::DEFAULT_MIN_SCORE;
use nonna_limiter::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Id of the pasta name set
pub const PASTA_SET: &str = "pastas";
/// Id of the meme name set
pub const MEME_SET: &str = "memes";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonnaConfig {
    /// Rate limiter window and quota
    pub rate_limit: RateLimitConfig,
    /// Rate limit record store
    pub store: StoreConfig,
    /// Fuzzy suggestion settings
    pub fuzzy: FuzzyConfig,
    /// Knowledge source settings
    pub lookup: LookupConfig,
    /// Name list files
    pub lists: ListPaths,
    /// Acknowledgement reactions
    pub acknowledge: AcknowledgeConfig,
    /// Channels accepted outside a platform session
    pub channels: ChannelConfig,
}

impl NonnaConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With rate limit window and quota
    #[inline]
    #[must_use]
    pub fn with_rate_limit(mut self, window_ms: u64, max_requests: u32) -> Self {
        self.rate_limit = RateLimitConfig::new(window_ms, max_requests);
        self
    }

    /// With fuzzy minimum score
    #[inline]
    #[must_use]
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.fuzzy.min_score = min_score;
        self
    }

    /// With the sets queried for every request
    #[inline]
    #[must_use]
    pub fn with_default_sets<I, S>(mut self, sets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fuzzy.default_sets = sets.into_iter().map(Into::into).collect();
        self
    }

    /// With identities that get an acknowledgement reaction
    #[inline]
    #[must_use]
    pub fn with_acknowledged<I, S>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.acknowledge.identities = identities.into_iter().map(Into::into).collect();
        self
    }

    /// Load from a file, choosing the format by extension
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::UnsupportedFormat` for unknown extensions
    /// - `ConfigError::Parse` if the content does not parse
    /// - `ConfigError::Invalid` if a value is out of range
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let parse_err = |message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        };
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let config: Self = match extension.as_deref() {
            Some("toml") => toml::from_str(&raw).map_err(|e| parse_err(e.to_string()))?,
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&raw).map_err(|e| parse_err(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first bad field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fuzzy.min_score) {
            return Err(ConfigError::Invalid {
                field: "fuzzy.min_score",
                reason: format!("{} is outside [0, 1]", self.fuzzy.min_score),
            });
        }
        if self.fuzzy.default_sets.is_empty() {
            return Err(ConfigError::Invalid {
                field: "fuzzy.default_sets",
                reason: "at least one set is required".to_string(),
            });
        }
        if self.rate_limit.window_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit.window_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Invalid {
                field: "rate_limit.max_requests",
                reason: "must be positive".to_string(),
            });
        }
        if self.lookup.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "lookup.timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Which rate limit store backs the limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Plain concurrent map
    Memory,
    /// Cache that evicts idle identities
    Expiring,
}

/// Rate limit store settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store implementation
    pub kind: StoreKind,
    /// Max identities kept by the expiring store
    pub max_capacity: u64,
    /// Idle seconds before the expiring store drops an identity
    pub idle_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Memory,
            max_capacity: 10_000,
            idle_secs: 600,
        }
    }
}

/// Fuzzy suggestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Minimum score for a suggestion
    pub min_score: f64,
    /// Sets queried per request, in order
    pub default_sets: Vec<String>,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            default_sets: vec![PASTA_SET.to_string()],
        }
    }
}

/// Knowledge source settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupConfig {
    /// Summary endpoint; the encoded term is appended as a path segment
    pub base_url: String,
    /// `User-Agent` header
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/api/rest_v1/page/summary".to_string(),
            user_agent: "DiscordBot PastaBot Nonna".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Name list files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListPaths {
    /// Pasta names
    pub pastas: PathBuf,
    /// Meme names; optional
    pub memes: Option<PathBuf>,
    /// Content filter reference terms
    pub food: PathBuf,
}

impl Default for ListPaths {
    fn default() -> Self {
        Self {
            pastas: PathBuf::from("data/pastas.json"),
            memes: Some(PathBuf::from("data/memes.json")),
            food: PathBuf::from("data/food.json"),
        }
    }
}

/// Acknowledgement reactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcknowledgeConfig {
    /// Identities (case-insensitive) whose messages get a reaction
    pub identities: Vec<String>,
    /// Reaction emoji
    pub emoji: String,
}

impl AcknowledgeConfig {
    /// Whether `identity` is acknowledged
    #[must_use]
    pub fn includes(&self, identity: &str) -> bool {
        self.identities
            .iter()
            .any(|i| i.eq_ignore_ascii_case(identity))
    }
}

impl Default for AcknowledgeConfig {
    fn default() -> Self {
        Self {
            identities: Vec::new(),
            emoji: "🤌".to_string(),
        }
    }
}

/// Channels accepted when no platform directory is available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Allowed channel ids
    pub allowed: Vec<String>,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            allowed: vec!["console".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = NonnaConfig::default();
        assert_eq!(config.rate_limit.window_ms, 10_000);
        assert_eq!(config.rate_limit.max_requests, 5);
        assert!((config.fuzzy.min_score - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.fuzzy.default_sets, vec!["pastas"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn load_toml_with_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "nonna.toml",
            "[rate_limit]\nmax_requests = 2\n\n[fuzzy]\ndefault_sets = [\"pastas\", \"memes\"]\n",
        );

        let config = NonnaConfig::load(&path).unwrap();
        assert_eq!(config.rate_limit.max_requests, 2);
        assert_eq!(config.rate_limit.window_ms, 10_000);
        assert_eq!(config.fuzzy.default_sets, vec!["pastas", "memes"]);
    }

    #[test]
    fn load_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = write(&dir, "nonna.yml", "fuzzy:\n  min_score: 0.7\n");
        let json = write(&dir, "nonna.json", r#"{"store": {"kind": "expiring"}}"#);

        assert!((NonnaConfig::load(yaml).unwrap().fuzzy.min_score - 0.7).abs() < 1e-9);
        assert_eq!(
            NonnaConfig::load(json).unwrap().store.kind,
            StoreKind::Expiring
        );
    }

    #[test]
    fn unknown_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "nonna.ini", "");
        assert!(matches!(
            NonnaConfig::load(path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn out_of_range_values_rejected() {
        let bad_score = NonnaConfig::new().with_min_score(1.5);
        assert!(matches!(
            bad_score.validate(),
            Err(ConfigError::Invalid { field: "fuzzy.min_score", .. })
        ));

        let no_sets = NonnaConfig::new().with_default_sets(Vec::<String>::new());
        assert!(no_sets.validate().is_err());

        let zero_quota = NonnaConfig::new().with_rate_limit(10_000, 0);
        assert!(zero_quota.validate().is_err());
    }

    #[test]
    fn acknowledge_is_case_insensitive() {
        let config = NonnaConfig::new().with_acknowledged(["Mercer_Less"]);
        assert!(config.acknowledge.includes("mercer_less"));
        assert!(!config.acknowledge.includes("someone"));
    }
}
