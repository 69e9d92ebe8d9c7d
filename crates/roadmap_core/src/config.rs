//! Runtime configuration.
//!
//! # Responsibility
//! - Carry store credentials and the delete-confirmation secret as explicit
//!   values passed to constructors.
//! - Load them from `ROADMAP_*` environment variables.
//!
//! # Invariants
//! - `Debug` output never contains the API key or the delete secret.

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_STORE_URL: &str = "https://api.jsonbin.io/v3/b";
pub const DEFAULT_AUTH_HEADER: &str = "X-Master-Key";
pub const DEFAULT_CACHE_KEY: &str = "roadmap-cache";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CACHE_FILE_NAME: &str = "roadmap_cache.sqlite3";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable is unset or blank.
    Missing(&'static str),
    /// Variable is set but cannot be parsed.
    Invalid { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(key) => write!(f, "missing required setting `{key}`"),
            Self::Invalid { key, value } => write!(f, "invalid value `{value}` for `{key}`"),
        }
    }
}

impl Error for ConfigError {}

/// Remote document store settings.
#[derive(Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Collection base URL; the document id is appended as a path segment.
    pub base_url: String,
    pub document_id: String,
    /// Static credential sent on every request.
    pub api_key: String,
    /// Header carrying `api_key`.
    pub auth_header: String,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(
        base_url: impl Into<String>,
        document_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            document_id: document_id.into(),
            api_key: api_key.into(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// URL returning the latest stored version.
    pub fn latest_url(&self) -> String {
        format!("{}/latest", self.document_url())
    }

    /// URL accepting full replacement writes.
    pub fn document_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.document_id
        )
    }
}

impl Debug for StoreConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("document_id", &self.document_id)
            .field("api_key", &"<redacted>")
            .field("auth_header", &self.auth_header)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Full application configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    /// SQLite file holding the local document cache.
    pub cache_path: PathBuf,
    /// Slot key of the cached document.
    pub cache_key: String,
    /// Secret re-entered to confirm deletions.
    pub delete_secret: String,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Loads configuration from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Blank values are treated as unset. The delete secret is kept
    /// verbatim since confirmation compares it without trimming.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let timeout_secs = match get("ROADMAP_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "ROADMAP_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let store = StoreConfig {
            base_url: get("ROADMAP_STORE_URL").unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
            document_id: require("ROADMAP_DOCUMENT_ID")?,
            api_key: require("ROADMAP_API_KEY")?,
            auth_header: get("ROADMAP_AUTH_HEADER")
                .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            store,
            cache_path: get("ROADMAP_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_CACHE_FILE_NAME)),
            cache_key: get("ROADMAP_CACHE_KEY").unwrap_or_else(|| DEFAULT_CACHE_KEY.to_string()),
            delete_secret: lookup("ROADMAP_DELETE_SECRET")
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing("ROADMAP_DELETE_SECRET"))?,
            log_level: get("ROADMAP_LOG_LEVEL"),
            log_dir: get("ROADMAP_LOG_DIR"),
        })
    }
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("store", &self.store)
            .field("cache_path", &self.cache_path)
            .field("cache_key", &self.cache_key)
            .field("delete_secret", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, StoreConfig, DEFAULT_AUTH_HEADER, DEFAULT_CACHE_KEY};
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "doc-1"),
            ("ROADMAP_API_KEY", "key"),
            ("ROADMAP_DELETE_SECRET", "p"),
        ]))
        .expect("config should load");

        assert_eq!(config.store.document_id, "doc-1");
        assert_eq!(config.store.auth_header, DEFAULT_AUTH_HEADER);
        assert_eq!(config.store.timeout, Duration::from_secs(30));
        assert_eq!(config.cache_key, DEFAULT_CACHE_KEY);
        assert_eq!(config.delete_secret, "p");
    }

    #[test]
    fn blank_required_value_is_missing() {
        let err = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "  "),
            ("ROADMAP_API_KEY", "key"),
            ("ROADMAP_DELETE_SECRET", "p"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("ROADMAP_DOCUMENT_ID"));
    }

    #[test]
    fn delete_secret_is_kept_verbatim_but_not_blank() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "doc"),
            ("ROADMAP_API_KEY", "key"),
            ("ROADMAP_DELETE_SECRET", " p "),
        ]))
        .unwrap();
        assert_eq!(config.delete_secret, " p ");

        let err = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "doc"),
            ("ROADMAP_API_KEY", "key"),
            ("ROADMAP_DELETE_SECRET", " \t"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("ROADMAP_DELETE_SECRET"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "doc"),
            ("ROADMAP_API_KEY", "key"),
            ("ROADMAP_DELETE_SECRET", "p"),
            ("ROADMAP_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ROADMAP_TIMEOUT_SECS", .. }));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ROADMAP_DOCUMENT_ID", "doc"),
            ("ROADMAP_API_KEY", "super-secret-key"),
            ("ROADMAP_DELETE_SECRET", "gate-secret"),
        ]))
        .expect("config should load");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
        assert!(!rendered.contains("gate-secret"));
    }

    #[test]
    fn urls_join_base_and_document_id() {
        let store = StoreConfig::new("https://store.test/v3/b/", "abc", "k");
        assert_eq!(store.document_url(), "https://store.test/v3/b/abc");
        assert_eq!(store.latest_url(), "https://store.test/v3/b/abc/latest");
    }
}
