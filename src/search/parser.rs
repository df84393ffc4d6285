//! Query Parser & Preprocessor
//!
//! Splits a free-text query into normalized terms. Every term must match
//! somewhere for a product to qualify, so dropping degenerate terms here
//! keeps single letters from matching half the catalog.

use super::fuzzy::normalize_for_matching;
use unicode_segmentation::UnicodeSegmentation;

/// Parsed and processed search query
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Original unmodified query
    pub original: String,
    /// Normalized terms, in query order
    pub terms: Vec<String>,
}

impl ParsedQuery {
    /// True when nothing in the query is long enough to search for
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Query parser and preprocessor
pub struct QueryParser;

impl QueryParser {
    /// Parse a search query, ignoring terms shorter than `min_term_len`
    /// characters
    pub fn parse(query: &str, min_term_len: usize) -> ParsedQuery {
        let terms = query
            .split_whitespace()
            .map(normalize_for_matching)
            .filter(|term| Self::char_len(term) >= min_term_len)
            .collect();

        ParsedQuery {
            original: query.to_string(),
            terms,
        }
    }

    /// Length in user-perceived characters
    fn char_len(term: &str) -> usize {
        term.graphemes(true).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_parsing() {
        let parsed = QueryParser::parse("Toyota Brake", 2);
        assert_eq!(parsed.original, "Toyota Brake");
        assert_eq!(parsed.terms, vec!["toyota", "brake"]);
    }

    #[test]
    fn test_irregular_whitespace() {
        let parsed = QueryParser::parse("  spark\tplug \n ", 2);
        assert_eq!(parsed.terms, vec!["spark", "plug"]);
    }

    #[test]
    fn test_short_terms_dropped() {
        let parsed = QueryParser::parse("a 555 b joint", 2);
        assert_eq!(parsed.terms, vec!["555", "joint"]);

        let parsed = QueryParser::parse("x y z", 2);
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_empty_query() {
        assert!(QueryParser::parse("", 2).is_empty());
        assert!(QueryParser::parse("   ", 2).is_empty());
    }

    #[test]
    fn test_punctuation_kept_in_term() {
        let parsed = QueryParser::parse("brake-steering SK20R11", 2);
        assert_eq!(parsed.terms, vec!["brake-steering", "sk20r11"]);
    }

    #[test]
    fn test_grapheme_length() {
        // "é" written as e + combining accent is one character
        let parsed = QueryParser::parse("e\u{301}", 2);
        assert!(parsed.is_empty());
        let parsed = QueryParser::parse("e\u{301}t", 2);
        assert_eq!(parsed.terms.len(), 1);
    }
}
