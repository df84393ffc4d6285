use proptest::prelude::*;
use proptest::sample::select;
use std::sync::{Arc, OnceLock};

use crate::catalog::{Catalog, Category, Product};
use crate::listing::{listing, ListingQuery, Selection, SortOrder};
use crate::search::fuzzy::{normalize_for_matching, EditDistanceMatcher, TermMatcher};
use crate::search::{QueryParser, SearchEngine, SearchField};

fn engine() -> &'static SearchEngine {
    static ENGINE: OnceLock<SearchEngine> = OnceLock::new();
    ENGINE.get_or_init(|| SearchEngine::new(Arc::new(Catalog::builtin().unwrap())))
}

/// Vocabulary drawn from the catalog plus typos and noise
fn word() -> impl Strategy<Value = String> {
    prop_oneof![
        select(vec![
            "toyota", "toyta", "brake", "brke", "pads", "spark", "plug", "555", "rbi", "ball",
            "joint", "rack", "end", "stabilizer", "link", "asimco", "engine", "sk20r11",
            "xyzzy", "a", "b",
        ])
        .prop_map(str::to_string),
        "[a-z0-9]{1,8}",
    ]
}

fn query() -> impl Strategy<Value = String> {
    proptest::collection::vec(word(), 0..4).prop_map(|words| words.join(" "))
}

fn field_distance(product: &Product, field: SearchField, term: &str) -> f64 {
    field
        .values(product)
        .into_iter()
        .map(|value| EditDistanceMatcher::new().distance(&normalize_for_matching(value), term))
        .fold(f64::INFINITY, f64::min)
}

proptest! {
    // Same query, same catalog: same answer
    #[test]
    fn search_is_deterministic(q in query()) {
        let engine = engine();
        prop_assert_eq!(engine.search(&q), engine.search(&q));
    }

    // Every result matches every kept term in some field
    #[test]
    fn every_result_matches_all_terms(q in query()) {
        let parsed = QueryParser::parse(&q, 2);
        for product in engine().search(&q) {
            for term in &parsed.terms {
                let best = SearchField::ALL
                    .into_iter()
                    .map(|field| field_distance(product, field, term))
                    .fold(f64::INFINITY, f64::min);
                prop_assert!(best <= 0.3, "{} does not match {:?}", product.id, term);
            }
        }
    }

    // Queries with no term of two characters or more find nothing
    #[test]
    fn degenerate_queries_are_empty(q in "[ \t]{0,3}([a-z][ \t]{1,3}){0,4}") {
        prop_assert!(engine().search(&q).is_empty());
    }

    // Results are ordered by score, best first
    #[test]
    fn scores_are_monotonic(q in query()) {
        let results = engine().search_with_scores(&q);
        prop_assert!(results.windows(2).all(|w| w[0].score.value <= w[1].score.value));
    }

    // Scoped listings partition the unscoped one
    #[test]
    fn categories_partition_listing(q in query()) {
        let engine = engine();
        let all = listing(engine, &ListingQuery { text: q.clone(), ..ListingQuery::default() });
        let mut scoped = 0;
        for category in Category::ALL {
            let query = ListingQuery {
                text: q.clone(),
                ..ListingQuery::for_category(category)
            };
            let products = listing(engine, &query);
            prop_assert!(products.iter().all(|p| p.category == category));
            scoped += products.len();
        }
        prop_assert_eq!(scoped, all.len());
    }

    // Facets only ever narrow, and price sorts only reorder
    #[test]
    fn facets_narrow_and_sorts_reorder(
        q in query(),
        category in select(Category::ALL.to_vec()),
        sort in select(SortOrder::ALL.to_vec()),
    ) {
        let engine = engine();
        let base = ListingQuery { text: q, ..ListingQuery::for_category(category) };
        let unsorted = listing(engine, &base);

        let sorted = listing(engine, &ListingQuery { sort: Selection::Only(sort), ..base.clone() });
        prop_assert_eq!(sorted.len(), unsorted.len());
        match sort {
            SortOrder::Featured => prop_assert_eq!(&sorted, &unsorted),
            SortOrder::PriceLow => prop_assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price)),
            SortOrder::PriceHigh => prop_assert!(sorted.windows(2).all(|w| w[0].price >= w[1].price)),
        }

        let branded = listing(
            engine,
            &ListingQuery { brand: Some("in stock".to_string()), ..base.clone() },
        );
        prop_assert!(branded.len() <= unsorted.len());
        prop_assert!(branded.iter().all(|p| unsorted.contains(p)));
    }

    // Unknown facet values never match anything
    #[test]
    fn unknown_facet_values_are_empty(q in query(), junk in "[a-z]{3,10}") {
        prop_assume!(junk.parse::<SortOrder>().is_err());
        let query = ListingQuery::from_query_string(&format!("q={}&sort={}", q, junk));
        prop_assert!(listing(engine(), &query).is_empty());
    }
}
