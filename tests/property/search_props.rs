//! Invariants of tiered search.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::common::index_of;
use wikidex::{search, SearchIndex, Tier};

// ============================================================================
// STRATEGIES
// ============================================================================

fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{2,7}").unwrap()
}

/// Titles of one to three capitalized words.
fn title_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..4).prop_map(|words| {
        words
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    })
}

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(title_strategy(), 1..40)
}

fn build(corpus: &[String]) -> SearchIndex {
    let titles: Vec<&str> = corpus.iter().map(String::as_str).collect();
    index_of(&titles)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn title_list_counts_non_reserved_titles(
        batches in prop::collection::vec(prop::collection::vec(
            prop_oneof![title_strategy(), title_strategy().prop_map(|t| format!("Template:{t}"))],
            0..10,
        ), 1..6),
    ) {
        let mut index = SearchIndex::new();
        let mut expected = 0;
        for batch in &batches {
            let before = index.len();
            index.ingest(batch);
            expected += batch.iter().filter(|title| !title.starts_with("Template:")).count();
            prop_assert!(index.len() >= before);
            prop_assert_eq!(index.len(), expected);
        }
    }

    #[test]
    fn results_respect_limit(corpus in corpus_strategy(), query in word_strategy(), limit in 0usize..20) {
        let index = build(&corpus);
        prop_assert!(search(&index, &query, limit).len() <= limit);
    }

    #[test]
    fn results_have_no_duplicates(corpus in corpus_strategy(), query in word_strategy()) {
        let index = build(&corpus);
        let hits = search(&index, &query, 50);
        let distinct: HashSet<&str> = hits.iter().map(|hit| hit.title.as_str()).collect();
        prop_assert_eq!(distinct.len(), hits.len());
    }

    #[test]
    fn results_sorted_by_tier_then_lowercase_title(corpus in corpus_strategy(), query in word_strategy()) {
        let index = build(&corpus);
        let hits = search(&index, &query, 50);
        for pair in hits.windows(2) {
            let a = (pair[0].tier, pair[0].title.to_lowercase());
            let b = (pair[1].tier, pair[1].title.to_lowercase());
            prop_assert!(a <= b, "{:?} before {:?}", a, b);
        }
    }

    #[test]
    fn every_hit_contains_a_query_word(corpus in corpus_strategy(), query in word_strategy()) {
        let index = build(&corpus);
        for hit in search(&index, &query, 50) {
            let lower = hit.title.to_lowercase();
            prop_assert!(
                query.split_whitespace().any(|word| lower.contains(word)),
                "{} does not contain {}", hit.title, query
            );
        }
    }

    #[test]
    fn any_indexed_title_is_found_exactly(corpus in corpus_strategy(), pick in any::<prop::sample::Index>()) {
        let index = build(&corpus);
        let title = pick.get(&corpus);
        let hits = search(&index, &title.to_uppercase(), 50);
        prop_assert_eq!(hits[0].tier, Tier::Exact);
        prop_assert_eq!(hits[0].title.to_lowercase(), title.to_lowercase());
    }

    #[test]
    fn more_titles_never_shrink_results(corpus in corpus_strategy(), extra in corpus_strategy(), query in word_strategy()) {
        let mut index = build(&corpus);
        let before = search(&index, &query, 1000).len();
        index.ingest(&extra);
        let after = search(&index, &query, 1000).len();
        prop_assert!(after >= before);
    }
}
