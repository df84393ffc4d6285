//! partsearch: product catalog search and filtering for an auto-parts
//! storefront.
//!
//! - [`catalog`]: product model, seed documents and the immutable store
//! - [`search`]: weighted fuzzy search over the catalog
//! - [`listing`]: the category / search / facet / sort pipeline behind listing pages
//! - [`service`]: async owned-value facade used by the CLI

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod listing;
pub mod pagination;
pub mod search;
pub mod service;

pub use catalog::{Catalog, CatalogError, Category, Product, Subcategory};
pub use config::{ConfigError, SearchSettings, StorefrontConfig};
pub use error::AppError;
pub use listing::{listing, ListingQuery, Selection, SortOrder};
pub use search::SearchEngine;
pub use service::CatalogService;
