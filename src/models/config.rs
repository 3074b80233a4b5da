// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Dataset location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Result capping and pagination
    #[serde(default)]
    pub search: SearchConfig,

    /// Structure depiction service
    #[serde(default)]
    pub render: RenderConfig,

    /// Outbound reference links
    #[serde(default)]
    pub links: LinksConfig,

    /// Console output
    #[serde(default)]
    pub output: OutputConfig,
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
        if self.catalog.dataset_path.as_os_str().is_empty() {
            return Err(AppError::validation("catalog.dataset_path is empty"));
        }
        if self.search.result_cap == 0 {
            return Err(AppError::validation("search.result_cap must be > 0"));
        }
        if self.search.items_per_page == 0 {
            return Err(AppError::validation("search.items_per_page must be > 0"));
        }
        if self.render.timeout_secs == 0 {
            return Err(AppError::validation("render.timeout_secs must be > 0"));
        }
        if self.render.max_concurrent == 0 {
            return Err(AppError::validation("render.max_concurrent must be > 0"));
        }
        if self.render.user_agent.trim().is_empty() {
            return Err(AppError::validation("render.user_agent is empty"));
        }
        if !self.render.endpoint.contains("{smiles}") {
            return Err(AppError::validation(
                "render.endpoint must contain a {smiles} placeholder",
            ));
        }
        if !self.links.reference_url.contains("{cid}") {
            return Err(AppError::validation(
                "links.reference_url must contain a {cid} placeholder",
            ));
        }
        Ok(())
    }

    /// Resolve the dataset path against a base directory.
    pub fn dataset_path(&self, base_path: &Path) -> PathBuf {
        if self.catalog.dataset_path.is_absolute() {
            self.catalog.dataset_path.clone()
        } else {
            base_path.join(&self.catalog.dataset_path)
        }
    }
}

/// Static dataset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON index of chemical records
    #[serde(default = "defaults::dataset_path")]
    pub dataset_path: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dataset_path: defaults::dataset_path(),
        }
    }
}

/// Result presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of results handed to the presentation layer
    #[serde(default = "defaults::result_cap")]
    pub result_cap: usize,

    /// Batch size for revealing results
    #[serde(default = "defaults::items_per_page")]
    pub items_per_page: usize,

    /// Leading visible items rendered eagerly
    #[serde(default = "defaults::priority_renders")]
    pub priority_renders: usize,

    /// Recent searches kept in a session
    #[serde(default = "defaults::recent_capacity")]
    pub recent_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_cap: defaults::result_cap(),
            items_per_page: defaults::items_per_page(),
            priority_renders: defaults::priority_renders(),
            recent_capacity: defaults::recent_capacity(),
        }
    }
}

/// Structure depiction service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Endpoint template, `{smiles}` is replaced with the encoded structure
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for depiction requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent depiction requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Reference URL template, `{cid}` is replaced with the compound id
    #[serde(default = "defaults::reference_url")]
    pub reference_url: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            reference_url: defaults::reference_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Line template for search results (see `ChemicalRecord::format`)
    #[serde(default = "defaults::result_template")]
    pub result_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            result_template: defaults::result_template(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use crate::models::chemical::DEFAULT_REFERENCE_URL;

    pub fn dataset_path() -> PathBuf {
        PathBuf::from("data/odor_search_index.json")
    }

    // Search defaults
    pub fn result_cap() -> usize {
        500
    }
    pub fn items_per_page() -> usize {
        24
    }
    pub fn priority_renders() -> usize {
        6
    }
    pub fn recent_capacity() -> usize {
        10
    }

    // Render defaults
    pub fn endpoint() -> String {
        "https://www.simolecule.com/cdkdepict/depict/bow/svg?smi={smiles}".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; OpenSmell/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent() -> usize {
        4
    }

    pub fn reference_url() -> String {
        DEFAULT_REFERENCE_URL.into()
    }

    pub fn result_template() -> String {
        "{cid}  {name}  [{descriptors}]".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.search.items_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_endpoint_without_placeholder() {
        let mut config = Config::default();
        config.render.endpoint = "https://depict.example.com/svg".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.render.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            items_per_page = 12
            "#,
        )
        .unwrap();
        assert_eq!(config.search.items_per_page, 12);
        assert_eq!(config.search.result_cap, 500);
        assert_eq!(config.render.max_concurrent, 4);
        assert_eq!(
            config.catalog.dataset_path,
            PathBuf::from("data/odor_search_index.json")
        );
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/opensmell.toml");
        assert_eq!(config.search.result_cap, 500);
    }

    #[test]
    fn dataset_path_is_resolved_against_base() {
        let config = Config::default();
        assert_eq!(
            config.dataset_path(Path::new("/srv/opensmell")),
            PathBuf::from("/srv/opensmell/data/odor_search_index.json")
        );
    }
}
