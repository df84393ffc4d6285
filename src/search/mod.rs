//! Fuzzy catalog search
//!
//! Free-text queries are split into terms, every term is matched
//! approximately against the weighted product fields, and matching products
//! come back best first.

pub mod engine;
pub mod fuzzy;
pub mod parser;
pub mod ranking;
pub mod scorer;

#[cfg(test)]
mod property_tests;

pub use engine::{SearchEngine, SearchResult};
pub use fuzzy::{EditDistanceMatcher, SubsequenceMatcher, TermMatcher};
pub use parser::{ParsedQuery, QueryParser};
pub use ranking::{FieldHit, FieldWeights, MatchScore, SearchField};
pub use scorer::{Scorer, SearchDocument, WeightedScorer};
