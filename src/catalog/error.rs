use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog seed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Catalog seed is not valid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Product id cannot be empty")]
    EmptyId,
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),
    #[error("Invalid price {price} for product {id}")]
    InvalidPrice { id: String, price: f64 },
}

/// A string that does not name any variant of a closed enumeration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
