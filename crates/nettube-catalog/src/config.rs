//! Catalog configuration.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use nettube_models::{SourceType, DEFAULT_ORIGIN};
use tracing::warn;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Catalog pipeline configuration.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Gemini API key; `None` sends every fetch straight to the fallback dataset
    pub api_key: Option<String>,
    /// Gemini model name
    pub model: String,
    /// API base URL (overridden in tests)
    pub api_base: String,
    /// Origin of the page embedding the players
    pub origin: String,
    /// Source types accepted from live results
    pub allowed_platforms: HashSet<SourceType>,
    /// Number of items requested per category
    pub result_limit: usize,
    /// Transport timeout for one model call
    pub request_timeout: Duration,
    /// Enable Google Search grounding on the model call
    pub web_search: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            allowed_platforms: SourceType::ALL.into_iter().collect(),
            result_limit: DEFAULT_RESULT_LIMIT,
            request_timeout: Duration::from_secs(30),
            web_search: true,
        }
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("origin", &self.origin)
            .field("allowed_platforms", &self.allowed_platforms)
            .field("result_limit", &self.result_limit)
            .field("request_timeout", &self.request_timeout)
            .field("web_search", &self.web_search)
            .finish()
    }
}

impl CatalogConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model: non_empty("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: non_empty("GEMINI_API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            origin: non_empty("APP_ORIGIN").unwrap_or(defaults.origin),
            allowed_platforms: non_empty("CATALOG_ALLOWED_PLATFORMS")
                .map(|s| parse_platforms(&s))
                .unwrap_or(defaults.allowed_platforms),
            result_limit: non_empty("CATALOG_RESULT_LIMIT")
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.result_limit),
            request_timeout: non_empty("CATALOG_REQUEST_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            web_search: non_empty("GEMINI_WEB_SEARCH")
                .map(|s| !matches!(s.to_ascii_lowercase().as_str(), "0" | "false" | "off"))
                .unwrap_or(defaults.web_search),
        }
    }

    /// Restrict live results to YouTube only.
    pub fn youtube_only(mut self) -> Self {
        self.allowed_platforms = HashSet::from([SourceType::Youtube]);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// Parse a comma-separated platform list. Unknown names are skipped; an
/// empty result means every platform is allowed.
pub fn parse_platforms(list: &str) -> HashSet<SourceType> {
    let parsed: HashSet<SourceType> = list
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| match s.parse::<SourceType>() {
            Ok(source) => Some(source),
            Err(e) => {
                warn!("Ignoring platform in allow-list: {}", e);
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        SourceType::ALL.into_iter().collect()
    } else {
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = CatalogConfig::from_lookup(lookup(&[]));

        assert!(!config.has_credential());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.origin, DEFAULT_ORIGIN);
        assert_eq!(config.allowed_platforms.len(), 5);
        assert_eq!(config.result_limit, 10);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.web_search);
    }

    #[test]
    fn test_reads_overrides() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("API_KEY", "legacy-key"),
            ("GEMINI_MODEL", "gemini-2.5-flash"),
            ("GEMINI_API_BASE", "http://127.0.0.1:9999/"),
            ("APP_ORIGIN", "https://nettube.example"),
            ("CATALOG_ALLOWED_PLATFORMS", "youtube, vimeo"),
            ("CATALOG_RESULT_LIMIT", "5"),
            ("CATALOG_REQUEST_TIMEOUT", "7"),
            ("GEMINI_WEB_SEARCH", "off"),
        ]));

        assert_eq!(config.api_key.as_deref(), Some("legacy-key"));
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.api_base, "http://127.0.0.1:9999");
        assert_eq!(config.origin, "https://nettube.example");
        assert_eq!(
            config.allowed_platforms,
            HashSet::from([SourceType::Youtube, SourceType::Vimeo])
        );
        assert_eq!(config.result_limit, 5);
        assert_eq!(config.request_timeout, Duration::from_secs(7));
        assert!(!config.web_search);
    }

    #[test]
    fn test_gemini_key_takes_precedence_and_blank_is_missing() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "primary"),
            ("API_KEY", "legacy"),
        ]));
        assert_eq!(config.api_key.as_deref(), Some("primary"));

        let config = CatalogConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "   ")]));
        assert!(!config.has_credential());
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("CATALOG_RESULT_LIMIT", "0"),
            ("CATALOG_REQUEST_TIMEOUT", "soon"),
        ]));
        assert_eq!(config.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_parse_platforms_ignores_unknown_names() {
        assert_eq!(parse_platforms("youtube,twitch"), HashSet::from([SourceType::Youtube]));
        assert_eq!(parse_platforms("twitch").len(), 5);
        assert_eq!(parse_platforms(" , ").len(), 5);
    }

    #[test]
    fn test_youtube_only_and_debug_redaction() {
        let config = CatalogConfig::default().with_api_key("secret-key").youtube_only();
        assert_eq!(config.allowed_platforms, HashSet::from([SourceType::Youtube]));

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
