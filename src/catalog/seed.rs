//! Catalog seed documents
//!
//! The seed is authored ahead of time and shipped with the storefront. The
//! built-in seed is compiled into the binary; brand variants can point at
//! their own seed file instead.

use super::error::CatalogError;
use super::product::Product;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

const BUILTIN_SEED: &str = include_str!("../../data/catalog.json");

/// Versioned list of products as authored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CatalogSeed {
    /// Authoring version of the catalog
    pub version: String,
    pub products: Vec<Product>,
}

impl CatalogSeed {
    /// Seed shipped with the storefront
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_SEED)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// JSON Schema describing a seed document
    pub fn json_schema() -> RootSchema {
        schemars::schema_for!(CatalogSeed)
    }

    /// SHA-256 of the canonical serialization, identifying the snapshot
    pub fn fingerprint(&self) -> Result<String, CatalogError> {
        let canonical = serde_json::to_vec(self)?;
        Ok(hex::encode(Sha256::digest(&canonical)))
    }
}
