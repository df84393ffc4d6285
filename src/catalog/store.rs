//! Immutable in-memory catalog and its lookup accessors

use super::error::CatalogError;
use super::product::{subcategories, Category, Product, Subcategory, SubcategoryInfo};
use super::seed::CatalogSeed;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Catalog snapshot, loaded once and never mutated
#[derive(Debug)]
pub struct Catalog {
    version: String,
    fingerprint: String,
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Validate a seed and index it
    pub fn new(seed: CatalogSeed) -> Result<Self, CatalogError> {
        let fingerprint = seed.fingerprint()?;
        let mut by_id = HashMap::with_capacity(seed.products.len());

        for (index, product) in seed.products.iter().enumerate() {
            if product.id.is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(CatalogError::InvalidPrice {
                    id: product.id.clone(),
                    price: product.price,
                });
            }
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }

        info!(
            version = %seed.version,
            fingerprint = %fingerprint,
            products = seed.products.len(),
            "Loaded catalog"
        );

        Ok(Self {
            version: seed.version,
            fingerprint,
            products: seed.products,
            by_id,
        })
    }

    /// Catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(CatalogSeed::builtin()?)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(CatalogSeed::from_json(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        debug!("Loading catalog seed from {}", path.display());
        Self::new(CatalogSeed::from_path(path)?)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product in authoring order
    pub fn all_products(&self) -> &[Product] {
        &self.products
    }

    pub fn get_product_by_id(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&index| &self.products[index])
    }

    pub fn get_products_by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct brand labels in first-seen order
    pub fn list_brands(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(|p| p.brand.as_str())
            .filter(|brand| seen.insert(*brand))
            .collect()
    }

    pub fn list_subcategories(&self) -> BTreeMap<Subcategory, SubcategoryInfo> {
        subcategories()
    }

    /// Products of `category` (and `brand`, when given) bucketed by subcategory.
    /// Every subcategory has a bucket, empty or not.
    pub fn group_by_category_and_subcategory(
        &self,
        category: Category,
        brand: Option<&str>,
    ) -> BTreeMap<Subcategory, Vec<&Product>> {
        let mut grouped: BTreeMap<Subcategory, Vec<&Product>> =
            Subcategory::ALL.into_iter().map(|s| (s, Vec::new())).collect();

        for product in self
            .products
            .iter()
            .filter(|p| p.category == category && brand.map_or(true, |b| p.brand == b))
        {
            grouped.entry(product.subcategory).or_default().push(product);
        }

        grouped
    }

    /// Other products from the same category and subcategory, catalog order
    pub fn related_products(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                p.category == product.category
                    && p.subcategory == product.subcategory
                    && p.id != product.id
            })
            .take(limit)
            .collect()
    }
}
