//! Storefront configuration
//!
//! Each brand variant of the storefront is a JSON document naming the shop,
//! its currency label, an optional catalog seed and the search tuning. Every
//! field is optional; missing fields fall back to the reference calibration.

use crate::catalog::{Catalog, CatalogError};
use crate::search::FieldWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
    #[error("Invalid field weights: {0}")]
    InvalidWeights(String),
    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },
}

/// Which term matcher backs the fuzzy search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatcherKind {
    /// Approximate substring matching by edit distance
    #[default]
    EditDistance,
    /// Smith-Waterman style subsequence matching (nucleo)
    Subsequence,
}

/// Search tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    /// 0.0 accepts exact matches only, 1.0 accepts anything
    pub threshold: f64,
    /// Query terms shorter than this many characters are ignored
    pub min_term_len: usize,
    pub weights: FieldWeights,
    pub matcher: MatcherKind,
    /// Results shown in the search overlay
    pub suggestion_limit: usize,
    /// Products shown in the related-products panel
    pub related_limit: usize,
    /// Items revealed per "load more"
    pub page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            min_term_len: 2,
            weights: FieldWeights::default(),
            matcher: MatcherKind::default(),
            suggestion_limit: 4,
            related_limit: 4,
            page_size: 12,
        }
    }
}

impl SearchSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::InvalidThreshold(self.threshold));
        }
        self.weights.validate()?;

        let limits = [
            ("min_term_len", self.min_term_len),
            ("suggestion_limit", self.suggestion_limit),
            ("related_limit", self.related_limit),
            ("page_size", self.page_size),
        ];
        if let Some((name, _)) = limits.into_iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroLimit { name });
        }

        Ok(())
    }
}

/// One brand variant of the storefront
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorefrontConfig {
    pub name: String,
    /// Prefix used when displaying prices
    pub currency_label: String,
    /// Catalog seed file; the built-in catalog when absent
    pub catalog: Option<PathBuf>,
    pub search: SearchSettings,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            name: "Gathex Auto Spares".to_string(),
            currency_label: "KSh".to_string(),
            catalog: None,
            search: SearchSettings::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.search.validate()?;
        Ok(config)
    }

    /// Load a config file. A relative catalog path is resolved against the
    /// directory holding the config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading storefront config from {}", path.display());
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_json(&json)?;
        if let (Some(catalog), Some(base)) = (config.catalog.as_ref(), path.parent()) {
            if catalog.is_relative() {
                config.catalog = Some(base.join(catalog));
            }
        }

        Ok(config)
    }

    /// Load the configured catalog snapshot
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path),
            None => Catalog::builtin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_calibration() {
        let config = StorefrontConfig::default();
        assert_eq!(config.search.threshold, 0.3);
        assert_eq!(config.search.min_term_len, 2);
        assert_eq!(config.search.matcher, MatcherKind::EditDistance);
        assert_eq!(config.search.page_size, 12);
        assert!(config.search.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = StorefrontConfig::from_json(
            r#"{"name":"Second Brand","search":{"threshold":0.2,"matcher":"subsequence"}}"#,
        )
        .unwrap();
        assert_eq!(config.name, "Second Brand");
        assert_eq!(config.currency_label, "KSh");
        assert_eq!(config.search.threshold, 0.2);
        assert_eq!(config.search.matcher, MatcherKind::Subsequence);
        assert_eq!(config.search.suggestion_limit, 4);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let err = StorefrontConfig::from_json(r#"{"search":{"threshold":1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold(t) if t == 1.5));
    }

    #[test]
    fn test_rejects_out_of_order_weights() {
        let err = StorefrontConfig::from_json(
            r#"{"search":{"weights":{"name":0.1,"description":0.3,"brand":0.2,"features":0.05,"subcategory":0.05}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWeights(_)));
    }

    #[test]
    fn test_rejects_zero_limit() {
        let err = StorefrontConfig::from_json(r#"{"search":{"page_size":0}}"#).unwrap_err();
        assert_eq!(err.to_string(), "page_size must be at least 1");
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(StorefrontConfig::from_json(r#"{"theme":"dark"}"#).is_err());
    }

    #[test]
    fn test_load_resolves_catalog_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        fs::write(
            &seed_path,
            r#"{"version":"v2","products":[{"id":"x-1","name":"Brake Disc","description":"","price":0,"image":"","category":"new","brand":"in stock","features":[],"stock":0,"subcategory":"brake-steering"}]}"#,
        )
        .unwrap();

        let config_path = dir.path().join("storefront.json");
        let mut file = fs::File::create(&config_path).unwrap();
        write!(file, r#"{{"catalog":"seed.json"}}"#).unwrap();

        let config = StorefrontConfig::load(&config_path).unwrap();
        assert_eq!(config.catalog.as_deref(), Some(seed_path.as_path()));

        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.version(), "v2");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StorefrontConfig::load(Path::new("/nonexistent/storefront.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
