//! Async catalog service
//!
//! Owned-value facade over the search engine for callers living on a tokio
//! runtime. Scoring runs on the blocking pool under a timeout so a large
//! catalog never stalls the executor.

use crate::catalog::{Category, Product};
use crate::config::{SearchSettings, StorefrontConfig};
use crate::error::{validate_query, AppError};
use crate::listing::{listing, ListingQuery};
use crate::search::SearchEngine;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Upper bound for one catalog operation
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct CatalogService {
    engine: Arc<SearchEngine>,
    settings: SearchSettings,
}

impl CatalogService {
    pub fn new(engine: SearchEngine, settings: SearchSettings) -> Self {
        Self {
            engine: Arc::new(engine),
            settings,
        }
    }

    /// Load the configured catalog and build an engine for it
    pub fn from_config(config: &StorefrontConfig) -> Result<Self, AppError> {
        let catalog = Arc::new(config.load_catalog()?);
        let engine = SearchEngine::from_settings(catalog, &config.search)?;
        Ok(Self::new(engine, config.search.clone()))
    }

    pub fn engine(&self) -> &SearchEngine {
        &self.engine
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    async fn run<F, T>(&self, operation: &'static str, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&SearchEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        let task = tokio::task::spawn_blocking(move || f(&engine));

        match timeout(OPERATION_TIMEOUT, task).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(AppError::Internal(format!("{} task failed: {}", operation, e))),
            Err(_) => Err(AppError::Internal(format!(
                "{} exceeded {} second timeout",
                operation,
                OPERATION_TIMEOUT.as_secs()
            ))),
        }
    }

    /// Fuzzy search, best first. A blank query is not an error; it finds
    /// nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, AppError> {
        validate_query(query)?;
        let query = query.to_string();
        debug!("Search request: '{}'", query);
        self.run("search", move |engine| owned(engine.search(&query)))
            .await
    }

    pub async fn listing(&self, query: ListingQuery) -> Result<Vec<Product>, AppError> {
        validate_query(&query.text)?;
        self.run("listing", move |engine| owned(listing(engine, &query)))
            .await
    }

    pub async fn suggest(&self, query: &str) -> Result<Vec<Product>, AppError> {
        validate_query(query)?;
        let query = query.to_string();
        let limit = self.settings.suggestion_limit;
        self.run("suggest", move |engine| owned(engine.suggest(&query, limit)))
            .await
    }

    /// Product by id; an unknown or blank id is simply absent
    pub async fn get_product_by_id(&self, id: &str) -> Option<Product> {
        self.engine.catalog().get_product_by_id(id).cloned()
    }

    pub async fn get_products_by_category(&self, category: Category) -> Vec<Product> {
        owned(self.engine.catalog().get_products_by_category(category))
    }

    /// Related products for the detail page of `product`
    pub async fn related(&self, product: &Product) -> Vec<Product> {
        owned(
            self.engine
                .catalog()
                .related_products(product, self.settings.related_limit),
        )
    }

    pub async fn list_brands(&self) -> Vec<String> {
        self.engine
            .catalog()
            .list_brands()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

fn owned(products: Vec<&Product>) -> Vec<Product> {
    products.into_iter().cloned().collect()
}
