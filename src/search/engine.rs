//! Search Engine Integration
//!
//! Ties together query parsing, fuzzy matching, and ranking over a catalog
//! snapshot.

use super::fuzzy::{EditDistanceMatcher, SubsequenceMatcher};
use super::parser::QueryParser;
use super::ranking::MatchScore;
use super::scorer::{Scorer, SearchDocument, WeightedScorer};
use crate::catalog::{Catalog, Product, Subcategory};
use crate::config::{ConfigError, MatcherKind, SearchSettings};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Search result with product and score
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    pub product: &'a Product,
    pub score: MatchScore,
}

/// Search engine bound to one catalog snapshot
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    documents: Vec<SearchDocument>,
    scorer: Box<dyn Scorer>,
    min_term_len: usize,
}

impl SearchEngine {
    /// Create a search engine with the reference calibration
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let settings = SearchSettings::default();
        Self::with_scorer(
            catalog,
            Box::new(WeightedScorer::new(
                EditDistanceMatcher::new(),
                settings.weights,
                settings.threshold,
            )),
            settings.min_term_len,
        )
    }

    /// Create a search engine from validated settings
    pub fn from_settings(
        catalog: Arc<Catalog>,
        settings: &SearchSettings,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        let weights = settings.weights.clone();
        let scorer: Box<dyn Scorer> = match settings.matcher {
            MatcherKind::EditDistance => Box::new(WeightedScorer::new(
                EditDistanceMatcher::new(),
                weights,
                settings.threshold,
            )),
            MatcherKind::Subsequence => Box::new(WeightedScorer::new(
                SubsequenceMatcher::new(),
                weights,
                settings.threshold,
            )),
        };

        Ok(Self::with_scorer(catalog, scorer, settings.min_term_len))
    }

    /// Create a search engine around any scoring strategy
    pub fn with_scorer(catalog: Arc<Catalog>, scorer: Box<dyn Scorer>, min_term_len: usize) -> Self {
        let documents = catalog
            .all_products()
            .iter()
            .map(SearchDocument::from_product)
            .collect();

        Self {
            catalog,
            documents,
            scorer,
            min_term_len,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Matching products, best first; ties keep catalog order
    pub fn search(&self, query: &str) -> Vec<&Product> {
        self.search_with_scores(query)
            .into_iter()
            .map(|result| result.product)
            .collect()
    }

    /// Matching products with their scores, best first
    pub fn search_with_scores(&self, query: &str) -> Vec<SearchResult<'_>> {
        let started = Instant::now();
        let parsed = QueryParser::parse(query, self.min_term_len);
        if parsed.is_empty() {
            debug!("Query {:?} has no searchable terms", query);
            return Vec::new();
        }

        let mut results: Vec<SearchResult<'_>> = self
            .catalog
            .all_products()
            .iter()
            .zip(&self.documents)
            .filter_map(|(product, document)| {
                self.scorer
                    .score(&parsed, document)
                    .map(|score| SearchResult { product, score })
            })
            .collect();

        // Stable: equal scores stay in catalog order
        results.sort_by(|a, b| a.score.value.total_cmp(&b.score.value));

        debug!(
            query = %query,
            terms = parsed.terms.len(),
            matches = results.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Search completed"
        );

        results
    }

    /// Top results for the search-as-you-type overlay
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&Product> {
        let mut results = self.search(query);
        results.truncate(limit);
        results
    }

    /// Subcategory titles offered as one-click searches
    pub fn quick_picks(&self) -> Vec<&'static str> {
        Subcategory::ALL.iter().map(|s| s.title()).collect()
    }
}
