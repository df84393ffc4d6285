//! Relevance scoring strategy
//!
//! [`Scorer`] is the seam between the engine and the matching algorithm.
//! The shipped implementation, [`WeightedScorer`], runs a [`TermMatcher`]
//! over every searchable field and requires each query term to hit at least
//! one of them.

use super::fuzzy::{normalize_for_matching, TermMatcher};
use super::parser::ParsedQuery;
use super::ranking::{FieldHit, FieldWeights, MatchScore, SearchField};
use crate::catalog::Product;

/// Normalized searchable text of one product
#[derive(Debug, Clone)]
pub struct SearchDocument {
    fields: Vec<(SearchField, Vec<String>)>,
}

impl SearchDocument {
    pub fn from_product(product: &Product) -> Self {
        let fields = SearchField::ALL
            .into_iter()
            .map(|field| {
                let values = field
                    .values(product)
                    .into_iter()
                    .map(normalize_for_matching)
                    .collect();
                (field, values)
            })
            .collect();

        Self { fields }
    }

    pub fn values(&self, field: SearchField) -> &[String] {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, values)| values.as_slice())
            .unwrap_or_default()
    }
}

/// Scores one product against a parsed query; `None` means no match
pub trait Scorer: Send + Sync {
    fn score(&self, query: &ParsedQuery, document: &SearchDocument) -> Option<MatchScore>;
}

/// Weighted multi-field scorer with conjunctive term semantics
pub struct WeightedScorer<M> {
    matcher: M,
    weights: FieldWeights,
    threshold: f64,
}

impl<M: TermMatcher> WeightedScorer<M> {
    pub fn new(matcher: M, weights: FieldWeights, threshold: f64) -> Self {
        Self {
            matcher,
            weights,
            threshold,
        }
    }

    /// Best distance of `term` over the values of `field`
    fn field_distance(&self, document: &SearchDocument, field: SearchField, term: &str) -> f64 {
        document
            .values(field)
            .iter()
            .map(|value| self.matcher.distance(value, term))
            .fold(f64::INFINITY, f64::min)
    }
}

impl<M: TermMatcher> Scorer for WeightedScorer<M> {
    fn score(&self, query: &ParsedQuery, document: &SearchDocument) -> Option<MatchScore> {
        if query.is_empty() {
            return None;
        }

        let mut hits = Vec::new();
        for term in &query.terms {
            let term_hits: Vec<FieldHit> = SearchField::ALL
                .into_iter()
                .filter_map(|field| {
                    let distance = self.field_distance(document, field, term);
                    (distance <= self.threshold).then(|| FieldHit {
                        term: term.clone(),
                        field,
                        distance,
                    })
                })
                .collect();

            // Every term has to land somewhere
            if term_hits.is_empty() {
                return None;
            }
            hits.extend(term_hits);
        }

        Some(MatchScore::combine(hits, query.terms.len(), &self.weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Subcategory};
    use crate::search::fuzzy::EditDistanceMatcher;
    use crate::search::parser::QueryParser;

    fn brake_pads() -> Product {
        Product {
            id: "np-003".to_string(),
            name: "Toyota Asimco Brake Pads".to_string(),
            description: "Asimco brake pads designed for Toyota vehicles.".to_string(),
            price: 1500.0,
            image: String::new(),
            category: Category::New,
            brand: "in stock".to_string(),
            features: vec!["Low dust".to_string(), "Set of 4".to_string()],
            stock: 20,
            subcategory: Subcategory::BrakeSteering,
        }
    }

    fn scorer() -> WeightedScorer<EditDistanceMatcher> {
        WeightedScorer::new(EditDistanceMatcher::new(), FieldWeights::default(), 0.3)
    }

    #[test]
    fn test_document_normalizes_fields() {
        let doc = SearchDocument::from_product(&brake_pads());
        assert_eq!(doc.values(SearchField::Name), ["toyota asimco brake pads"]);
        assert_eq!(doc.values(SearchField::Features), ["low dust", "set of 4"]);
        assert_eq!(doc.values(SearchField::Subcategory), ["brake-steering"]);
    }

    #[test]
    fn test_all_terms_must_match() {
        let doc = SearchDocument::from_product(&brake_pads());
        let scorer = scorer();

        assert!(scorer
            .score(&QueryParser::parse("toyota brake", 2), &doc)
            .is_some());
        assert!(scorer
            .score(&QueryParser::parse("toyota spark", 2), &doc)
            .is_none());
    }

    #[test]
    fn test_hits_record_fields() {
        let doc = SearchDocument::from_product(&brake_pads());
        let score = scorer()
            .score(&QueryParser::parse("dust", 2), &doc)
            .unwrap();
        assert_eq!(score.hits.len(), 1);
        assert_eq!(score.hits[0].field, SearchField::Features);
        assert_eq!(score.hits[0].distance, 0.0);
    }

    #[test]
    fn test_empty_query_scores_nothing() {
        let doc = SearchDocument::from_product(&brake_pads());
        assert!(scorer().score(&QueryParser::parse("  ", 2), &doc).is_none());
    }

    #[test]
    fn test_empty_features_never_hit() {
        let mut product = brake_pads();
        product.features.clear();
        let doc = SearchDocument::from_product(&product);
        let score = scorer()
            .score(&QueryParser::parse("dust", 2), &doc);
        assert!(score.is_none());
    }

    #[test]
    fn test_zero_threshold_is_exact_only() {
        let doc = SearchDocument::from_product(&brake_pads());
        let exact = WeightedScorer::new(EditDistanceMatcher::new(), FieldWeights::default(), 0.0);
        assert!(exact.score(&QueryParser::parse("toyota", 2), &doc).is_some());
        assert!(exact.score(&QueryParser::parse("toyta", 2), &doc).is_none());
    }
}
