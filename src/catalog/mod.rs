//! Product catalog: data model, seed documents and the immutable store

pub mod error;
pub mod product;
pub mod seed;
pub mod store;

pub use error::{CatalogError, UnknownVariant};
pub use product::{subcategories, Category, Product, Subcategory, SubcategoryInfo};
pub use seed::CatalogSeed;
pub use store::Catalog;
