use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::filter::validate_threshold;

/// Main configuration for matcha-finder
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub places: PlacesConfig,
    pub extraction: ExtractionConfig,
    pub pacing: PacingConfig,
    pub filter: FilterConfig,
}

/// Configuration for the places/reviews/geocoding API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// API root; endpoints like `place/nearbysearch/json` are appended
    pub base_url: String,
    /// API key: literal value or "env:VAR_NAME" to read from environment
    pub api_key: Option<String>,
    /// Search radius in meters
    pub radius_m: u32,
    /// Place category the search is biased towards
    pub category: String,
    /// Free-text keyword the search is biased towards
    pub keyword: String,
    /// Maximum number of venues collected per search
    pub max_venues: usize,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api".into(),
            api_key: Some("env:GOOGLE_MAPS_API_KEY".into()),
            radius_m: 10_000,
            category: "cafe".into(),
            keyword: "matcha latte".into(),
            max_venues: 50,
        }
    }
}

impl PlacesConfig {
    /// Resolve the API key, supporting "env:VAR_NAME" syntax
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key.as_ref().and_then(|key| {
            if let Some(var_name) = key.strip_prefix("env:") {
                std::env::var(var_name).ok()
            } else if key.is_empty() {
                None
            } else {
                Some(key.clone())
            }
        })
    }
}

/// Configuration for review keyword extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// The product name looked up in review text
    pub term: String,
    /// Words the tagger should always treat as adjectives
    pub extra_adjectives: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            term: "matcha".into(),
            extra_adjectives: Vec::new(),
        }
    }
}

/// Courtesy delays between requests to the places API.
///
/// The API throttles aggressive polling and refuses a page token that is
/// used too soon after it was issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Pause after each review fetch
    pub review_delay_ms: u64,
    /// Pause before requesting the next result page
    pub page_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            review_delay_ms: 100,
            page_delay_ms: 2000,
        }
    }
}

impl PacingConfig {
    pub fn review_delay(&self) -> Duration {
        Duration::from_millis(self.review_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

/// Configuration for the interactive filter session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Rating threshold in effect before any rating filter is applied
    pub default_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_threshold: 1.0,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the filter engine would refuse at runtime
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.filter.default_threshold)
            .context("Invalid [filter] default_threshold")?;
        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the data directory for a project root
    pub fn data_dir(root: &Path) -> PathBuf {
        root.join(".matcha-finder")
    }

    /// Get the config file path for a project root
    pub fn config_path(root: &Path) -> PathBuf {
        Self::data_dir(root).join("config.toml")
    }

    /// Get the SQLite database path
    pub fn db_path(root: &Path) -> PathBuf {
        Self::data_dir(root).join("venues.db")
    }

    /// Load the config for an initialized root, failing with a hint otherwise
    pub fn load_initialized(root: &Path) -> Result<Self> {
        let config_path = Self::config_path(root);
        if !config_path.exists() {
            anyhow::bail!(
                "matcha-finder not initialized in {}. Run `matcha-finder init` first.",
                root.display()
            );
        }
        Self::load(&config_path).context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterError;

    #[test]
    fn test_defaults_match_search_contract() {
        let config = Config::default();
        assert_eq!(config.places.radius_m, 10_000);
        assert_eq!(config.places.category, "cafe");
        assert_eq!(config.places.keyword, "matcha latte");
        assert_eq!(config.places.max_venues, 50);
        assert_eq!(config.extraction.term, "matcha");
        assert_eq!(config.pacing.review_delay(), Duration::from_millis(100));
        assert_eq!(config.pacing.page_delay(), Duration::from_secs(2));
        assert_eq!(config.filter.default_threshold, 1.0);
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_str = r#"
[places]
base_url = "http://127.0.0.1:8080"
max_venues = 5

[extraction]
term = "hojicha"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.places.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.places.max_venues, 5);
        assert_eq!(config.places.category, "cafe");
        assert_eq!(config.extraction.term, "hojicha");
        assert!(config.extraction.extra_adjectives.is_empty());
        assert_eq!(config.pacing.page_delay_ms, 2000);
    }

    #[test]
    fn test_parse_pacing_and_filter() {
        let toml_str = r#"
[pacing]
review_delay_ms = 0
page_delay_ms = 0

[filter]
default_threshold = 3.5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pacing.review_delay(), Duration::ZERO);
        assert_eq!(config.pacing.page_delay(), Duration::ZERO);
        assert_eq!(config.filter.default_threshold, 3.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = Config::config_path(dir.path());
        let mut config = Config::default();
        config.extraction.extra_adjectives = vec!["umami".into()];
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.extraction.extra_adjectives, vec!["umami"]);
        assert_eq!(loaded.places.base_url, config.places.base_url);
    }

    #[test]
    fn test_load_rejects_invalid_default_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        for bad in ["-1.0", "nan"] {
            std::fs::write(&path, format!("[filter]\ndefault_threshold = {bad}\n")).unwrap();
            let err = Config::load(&path).unwrap_err();
            assert!(err.to_string().contains("default_threshold"));
            assert!(matches!(
                err.downcast_ref::<FilterError>(),
                Some(FilterError::InvalidThreshold(_))
            ));
        }

        std::fs::write(&path, "[filter]\ndefault_threshold = 0.0\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().filter.default_threshold, 0.0);
    }

    #[test]
    fn test_load_initialized_requires_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_initialized(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not initialized"));
    }

    #[test]
    fn test_api_key_resolve_literal() {
        let places = PlacesConfig {
            api_key: Some("literal-key".to_string()),
            ..Default::default()
        };
        assert_eq!(places.resolve_api_key(), Some("literal-key".to_string()));
    }

    #[test]
    fn test_api_key_resolve_env() {
        std::env::set_var("TEST_MATCHA_FINDER_API_KEY", "env-value");
        let places = PlacesConfig {
            api_key: Some("env:TEST_MATCHA_FINDER_API_KEY".to_string()),
            ..Default::default()
        };
        assert_eq!(places.resolve_api_key(), Some("env-value".to_string()));
        std::env::remove_var("TEST_MATCHA_FINDER_API_KEY");
    }

    #[test]
    fn test_api_key_resolve_empty() {
        let places = PlacesConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(places.resolve_api_key().is_none());
    }

    #[test]
    fn test_api_key_resolve_none() {
        let places = PlacesConfig {
            api_key: None,
            ..Default::default()
        };
        assert!(places.resolve_api_key().is_none());
    }
}
