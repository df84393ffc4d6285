//! Listing pipeline
//!
//! Combines the fuzzy search with exact facet filters and a price sort, in a
//! fixed order: category scope, text search, subcategory, brand, sort. Facet
//! values usually come from editable URL parameters, so a value that does
//! not name a known category, subcategory or sort yields an empty listing
//! instead of an error.

use crate::catalog::{Category, Product, Subcategory, UnknownVariant};
use crate::search::SearchEngine;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// A facet parameter after validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    /// Parameter absent or blank
    Any,
    Only(T),
    /// Parameter present but not a known value
    Unrecognized(String),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Any
    }
}

impl<T: FromStr> Selection<T> {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Selection::Any,
            Some(value) => value
                .parse()
                .map(Selection::Only)
                .unwrap_or_else(|_| Selection::Unrecognized(value.to_string())),
        }
    }
}

impl<T> Selection<T> {
    pub fn is_unrecognized(&self) -> bool {
        matches!(self, Selection::Unrecognized(_))
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::Only(value) => Some(value),
            _ => None,
        }
    }
}

/// Result ordering chosen by the shopper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Relevance order for searches, catalog order otherwise
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Featured, SortOrder::PriceLow, SortOrder::PriceHigh];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Featured => "featured",
            SortOrder::PriceLow => "price-low",
            SortOrder::PriceHigh => "price-high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Featured => "Featured",
            SortOrder::PriceLow => "Price: Low",
            SortOrder::PriceHigh => "Price: High",
        }
    }

    /// Stable price sort; `Featured` leaves the order alone
    pub fn apply(&self, products: &mut [&Product]) {
        match self {
            SortOrder::Featured => {}
            SortOrder::PriceLow => products.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortOrder::PriceHigh => products.sort_by(|a, b| b.price.total_cmp(&a.price)),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("sort", s))
    }
}

/// Filter chip shown above a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ActiveFilter {
    Search { value: String },
    Subcategory { value: Subcategory, label: &'static str },
    Brand { value: String },
}

/// Everything a listing page passes to the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingQuery {
    /// Free-text query; blank means no search
    pub text: String,
    /// Category the page is scoped to; `Any` for the whole catalog
    pub category: Selection<Category>,
    pub subcategory: Selection<Subcategory>,
    /// Exact brand label
    pub brand: Option<String>,
    pub sort: Selection<SortOrder>,
}

impl ListingQuery {
    /// Unfiltered listing of one category
    pub fn for_category(category: Category) -> Self {
        Self {
            category: Selection::Only(category),
            ..Self::default()
        }
    }

    /// Build from raw page parameters
    pub fn from_params(
        text: Option<&str>,
        category: Option<&str>,
        subcategory: Option<&str>,
        brand: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        Self {
            text: text.map(str::trim).unwrap_or_default().to_string(),
            category: Selection::parse(category),
            subcategory: Selection::parse(subcategory),
            brand: brand
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .map(str::to_string),
            sort: Selection::parse(sort),
        }
    }

    /// Parse a URL query string such as `q=brake&subcategory=engine&sort=price-low`.
    /// Unknown keys are ignored; a repeated key keeps its last value.
    pub fn from_query_string(query_string: &str) -> Self {
        let query_string = query_string.trim_start_matches('?');
        let mut text = None;
        let mut category = None;
        let mut subcategory = None;
        let mut brand = None;
        let mut sort = None;

        for (key, value) in url::form_urlencoded::parse(query_string.as_bytes()) {
            let slot = match &*key {
                "q" => &mut text,
                "category" => &mut category,
                "subcategory" => &mut subcategory,
                "brand" => &mut brand,
                "sort" => &mut sort,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }

        Self::from_params(
            text.as_deref(),
            category.as_deref(),
            subcategory.as_deref(),
            brand.as_deref(),
            sort.as_deref(),
        )
    }

    pub fn has_unrecognized(&self) -> bool {
        self.category.is_unrecognized()
            || self.subcategory.is_unrecognized()
            || self.sort.is_unrecognized()
    }

    /// Filter chips for the active search, subcategory and brand
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let mut filters = Vec::new();
        if !self.text.is_empty() {
            filters.push(ActiveFilter::Search {
                value: self.text.clone(),
            });
        }
        if let Some(subcategory) = self.subcategory.as_only() {
            filters.push(ActiveFilter::Subcategory {
                value: *subcategory,
                label: subcategory.title(),
            });
        }
        if let Some(brand) = &self.brand {
            filters.push(ActiveFilter::Brand {
                value: brand.clone(),
            });
        }
        filters
    }
}

/// Run the listing pipeline
pub fn listing<'a>(engine: &'a SearchEngine, query: &ListingQuery) -> Vec<&'a Product> {
    if query.has_unrecognized() {
        warn!(?query, "Listing parameters name unknown values");
        return Vec::new();
    }

    let catalog = engine.catalog();
    let scope = query.category.as_only().copied();
    let in_scope = |p: &Product| scope.map_or(true, |c| p.category == c);

    // 1. category scope
    let mut products: Vec<&Product> = match scope {
        Some(category) => catalog.get_products_by_category(category),
        None => catalog.all_products().iter().collect(),
    };

    // 2. text search, global then re-scoped
    if !query.text.trim().is_empty() {
        products = engine
            .search(&query.text)
            .into_iter()
            .filter(|p| in_scope(p))
            .collect();
    }

    // 3. subcategory
    if let Some(subcategory) = query.subcategory.as_only() {
        products.retain(|p| p.subcategory == *subcategory);
    }

    // 4. brand
    if let Some(brand) = &query.brand {
        products.retain(|p| &p.brand == brand);
    }

    // 5. sort
    if let Some(sort) = query.sort.as_only() {
        sort.apply(&mut products);
    }

    debug!(results = products.len(), "Listing composed");
    products
}
