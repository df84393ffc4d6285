//! Product record and its closed enumerations

use super::error::UnknownVariant;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sourcing origin of a part; partitions the catalog in two
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Brand new parts
    New,
    /// Used parts imported from Japan
    ExJapan,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::New, Category::ExJapan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::New => "new",
            Category::ExJapan => "ex-japan",
        }
    }

    /// Badge shown on product cards
    pub fn badge(&self) -> &'static str {
        match self {
            Category::New => "NEW",
            Category::ExJapan => "EX-JAPAN",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("category", s))
    }
}

/// Fixed part families used for navigation and faceting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Subcategory {
    Engine,
    BrakeSteering,
    SuspensionBody,
    ElectricalLight,
}

impl Subcategory {
    pub const ALL: [Subcategory; 4] = [
        Subcategory::Engine,
        Subcategory::BrakeSteering,
        Subcategory::SuspensionBody,
        Subcategory::ElectricalLight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subcategory::Engine => "engine",
            Subcategory::BrakeSteering => "brake-steering",
            Subcategory::SuspensionBody => "suspension-body",
            Subcategory::ElectricalLight => "electrical-light",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            Subcategory::Engine => "Engine",
            Subcategory::BrakeSteering => "Brake & Steering",
            Subcategory::SuspensionBody => "Suspension & Body",
            Subcategory::ElectricalLight => "Electrical & Light",
        }
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subcategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subcategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("subcategory", s))
    }
}

/// Static display information for a subcategory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubcategoryInfo {
    pub title: &'static str,
}

/// All subcategories keyed by slug order, with their display titles
pub fn subcategories() -> BTreeMap<Subcategory, SubcategoryInfo> {
    Subcategory::ALL
        .into_iter()
        .map(|s| (s, SubcategoryInfo { title: s.title() }))
        .collect()
}

/// A single sellable part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Product {
    /// Stable identifier, unique across the catalog
    pub id: String,
    pub name: String,
    pub description: String,
    /// Amount in the storefront currency; 0 means the price is not set yet
    pub price: f64,
    /// Display asset path or URL
    pub image: String,
    pub category: Category,
    /// Opaque facet label, not necessarily a manufacturer
    pub brand: String,
    pub features: Vec<String>,
    pub stock: u32,
    pub subcategory: Subcategory,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Whether `quantity` units can be put in a cart
    pub fn can_order(&self, quantity: u32) -> bool {
        quantity >= 1 && quantity <= self.stock
    }

    pub fn availability(&self) -> String {
        if self.in_stock() {
            format!("In Stock ({} available)", self.stock)
        } else {
            "Out of Stock".to_string()
        }
    }
}
