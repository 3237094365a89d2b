//! Same index, same query, same answer, on any thread.

use std::sync::Arc;
use std::thread;

use crate::common::{index_of, titles};
use wikidex::{search, SharedSearchIndex, TitleSearcher};

const TITLES: &[&str] = &[
    "Apple",
    "Apple pie",
    "Pineapple",
    "Applesauce",
    "Big Apple",
    "Snapple",
    "Crab apple",
];

#[test]
fn repeated_search_is_identical() {
    let index = index_of(TITLES);
    let first = search(&index, "apple", 50);
    for _ in 0..10 {
        assert_eq!(search(&index, "apple", 50), first);
    }
}

#[test]
fn insertion_order_does_not_change_ranking() {
    let forward = index_of(TITLES);
    let reversed: Vec<&str> = TITLES.iter().rev().copied().collect();
    let backward = index_of(&reversed);

    for query in ["apple", "app", "pie", "nap", "crab apple"] {
        assert_eq!(
            titles(&search(&forward, query, 50)),
            titles(&search(&backward, query, 50)),
            "query {query:?}"
        );
    }
}

#[test]
fn concurrent_searchers_agree() {
    let shared = Arc::new(SharedSearchIndex::new());
    shared.ingest(TITLES.iter().copied());
    let searcher = TitleSearcher::new(Arc::clone(&shared), 50);
    let expected = searcher.search("apple");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let searcher = searcher.clone();
            thread::spawn(move || searcher.search("apple"))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
