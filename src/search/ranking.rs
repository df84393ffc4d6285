//! Ranking & Scoring System
//!
//! Field hits are combined the way Fuse.js does it: each hit contributes its
//! distance raised to the field's normalized weight, and the contributions
//! multiply. The product is computed in log space and averaged per term so
//! long queries do not underflow.

use crate::catalog::Product;
use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stand-in distance for an exact hit so it still ranks by field weight
const EXACT_HIT: f64 = f64::EPSILON;

/// Searchable product fields, most important first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchField {
    Name,
    Description,
    Brand,
    Features,
    Subcategory,
}

impl SearchField {
    pub const ALL: [SearchField; 5] = [
        SearchField::Name,
        SearchField::Description,
        SearchField::Brand,
        SearchField::Features,
        SearchField::Subcategory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Name => "name",
            SearchField::Description => "description",
            SearchField::Brand => "brand",
            SearchField::Features => "features",
            SearchField::Subcategory => "subcategory",
        }
    }

    /// Raw text values of this field; list fields yield one value per entry
    pub fn values<'a>(&self, product: &'a Product) -> Vec<&'a str> {
        match self {
            SearchField::Name => vec![product.name.as_str()],
            SearchField::Description => vec![product.description.as_str()],
            SearchField::Brand => vec![product.brand.as_str()],
            SearchField::Features => product.features.iter().map(String::as_str).collect(),
            SearchField::Subcategory => vec![product.subcategory.as_str()],
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative importance of each field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldWeights {
    pub name: f64,
    pub description: f64,
    pub brand: f64,
    pub features: f64,
    pub subcategory: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            name: 0.4,        // Prioritize name matches
            description: 0.3, // Then description
            brand: 0.2,
            features: 0.1,
            subcategory: 0.1, // Broad matches
        }
    }
}

impl FieldWeights {
    pub fn get(&self, field: SearchField) -> f64 {
        match field {
            SearchField::Name => self.name,
            SearchField::Description => self.description,
            SearchField::Brand => self.brand,
            SearchField::Features => self.features,
            SearchField::Subcategory => self.subcategory,
        }
    }

    pub fn total(&self) -> f64 {
        SearchField::ALL.iter().map(|f| self.get(*f)).sum()
    }

    /// Weights must be positive and keep
    /// name > description > brand > features, subcategory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(field) = SearchField::ALL
            .into_iter()
            .find(|f| !(self.get(*f).is_finite() && self.get(*f) > 0.0))
        {
            return Err(ConfigError::InvalidWeights(format!(
                "{} weight must be a positive number",
                field
            )));
        }

        let ordered = self.name > self.description
            && self.description > self.brand
            && self.brand > self.features
            && self.brand > self.subcategory;
        if !ordered {
            return Err(ConfigError::InvalidWeights(
                "expected name > description > brand > features, subcategory".to_string(),
            ));
        }

        Ok(())
    }
}

/// One query term matching one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldHit {
    pub term: String,
    pub field: SearchField,
    /// Best distance among the field's values
    pub distance: f64,
}

/// Complete match score with the hits it was built from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchScore {
    /// 0.0 is a perfect match, 1.0 is the worst acceptable
    pub value: f64,
    pub hits: Vec<FieldHit>,
}

impl MatchScore {
    /// Combine the hits of a query with `term_count` terms
    pub fn combine(hits: Vec<FieldHit>, term_count: usize, weights: &FieldWeights) -> Self {
        let total_weight = weights.total();

        let log_sum: f64 = hits
            .iter()
            .map(|hit| {
                let norm_weight = weights.get(hit.field) / total_weight;
                norm_weight * hit.distance.max(EXACT_HIT).ln()
            })
            .sum();

        let value = if term_count == 0 {
            1.0
        } else {
            (log_sum / term_count as f64).exp().min(1.0)
        };

        Self { value, hits }
    }
}
