//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{Column, FilterState, QueryType, Sort};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Initial filter state and table layout
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::validation("api.base_url is empty"));
        }
        url::Url::parse(&self.api.base_url)
            .map_err(|e| AppError::validation(format!("api.base_url is invalid: {e}")))?;
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every API path is appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Explorer defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Query type selected at session start
    #[serde(default)]
    pub default_query_type: QueryType,

    /// Sort applied at session start, e.g. `"-current_price"`
    #[serde(default = "defaults::sort")]
    pub default_sort: String,

    /// Columns left out of the projected table
    #[serde(default)]
    pub excluded_columns: Vec<Column>,
}

impl ExplorerConfig {
    /// Initial filter state for a new session.
    pub fn initial_state(&self) -> Result<FilterState> {
        let sort: Sort = self.default_sort.parse()?;
        Ok(FilterState::with_defaults(self.default_query_type, sort))
    }

    /// Columns shown in the results table, in display order.
    pub fn visible_columns(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|column| !self.excluded_columns.contains(column))
            .collect()
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_query_type: QueryType::default(),
            default_sort: defaults::sort(),
            excluded_columns: Vec::new(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        format!("http://localhost:8000{}", crate::api::API_BASE)
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; rate-explorer/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn sort() -> String {
        "current_price".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.api.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://calc.example.gov/api\"\n\n[explorer]\ndefault_query_type = \"match_phrase\"\nexcluded_columns = [\"sin\"]"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://calc.example.gov/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.explorer.default_query_type, QueryType::MatchPhrase);
        assert!(!config.explorer.visible_columns().contains(&Column::Sin));
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("missing.toml"));
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn initial_state_uses_configured_sort() {
        let explorer = ExplorerConfig {
            default_sort: "-labor_category".to_string(),
            ..ExplorerConfig::default()
        };
        let state = explorer.initial_state().unwrap();
        assert_eq!(state.sort.to_wire(), "-labor_category");
        assert!(state.excluded_ids.is_empty());
    }
}
