//! Error types and handling at the application boundary

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use serde::Serialize;
use std::fmt;

/// Longest accepted free-text query, in characters
pub const MAX_QUERY_LEN: usize = 500;

/// Application error types
#[derive(Debug, Serialize)]
pub enum AppError {
    InvalidInput(String),
    NotFound(String),
    CatalogError(String),
    ConfigError(String),
    StorageError(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::CatalogError(msg) => write!(f, "Catalog error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Stable machine-readable code, used in JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "invalid_input",
            AppError::NotFound(_) => "not_found",
            AppError::CatalogError(_) => "catalog_error",
            AppError::ConfigError(_) => "config_error",
            AppError::StorageError(_) => "storage_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) => 1,
            AppError::NotFound(_) => 3,
            _ => 5,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::CatalogError(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

/// Exit code for an error that reached `main`
pub fn get_exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppError>()
        .map(AppError::exit_code)
        .unwrap_or(5)
}

/// Length guard for free-text queries. A blank query is valid and simply
/// matches nothing.
pub fn validate_query(query: &str) -> Result<(), AppError> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::InvalidInput(format!(
            "Query too long, maximum {} characters",
            MAX_QUERY_LEN
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(AppError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(AppError::CatalogError("x".into()).exit_code(), 5);
        assert_eq!(AppError::Internal("x".into()).exit_code(), 5);
    }

    #[test]
    fn test_exit_code_through_anyhow() {
        let err = anyhow::Error::new(AppError::NotFound("Product 'zz'".into()));
        assert_eq!(get_exit_code(&err), 3);
        assert_eq!(get_exit_code(&anyhow::anyhow!("boom")), 5);
    }

    #[test]
    fn test_display_and_code() {
        let err = AppError::NotFound("Product 'np-999'".to_string());
        assert_eq!(err.to_string(), "Not found: Product 'np-999'");
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn test_from_catalog_error() {
        let err: AppError = CatalogError::DuplicateId("np-001".to_string()).into();
        assert_eq!(err.error_code(), "catalog_error");
        assert!(err.message().contains("np-001"));
    }

    #[test]
    fn test_validate_query() {
        assert!(validate_query("brake pads").is_ok());
        assert!(validate_query("").is_ok());
        assert!(validate_query("   ").is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_LEN)).is_ok());
        assert!(validate_query(&"a".repeat(MAX_QUERY_LEN + 1)).is_err());
    }
}
