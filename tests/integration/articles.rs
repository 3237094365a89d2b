//! Article fetches against real multistream fixtures on disk.

use std::sync::Arc;

use crate::common::{library_with_config, library_with_pages};
use wikidex::testing::DumpBuilder;
use wikidex::{ArticleLookup, Library, RawMarkup};

const PAGES: &[(u64, &str, &str)] = &[
    (1, "Apple", "'''Apple''' is a [[fruit]]."),
    (2, "Banana", "A ''yellow'' fruit.\n[[Category:Fruits]]"),
    (3, "Cherry", "Small and red.\n[[Category:Fruits]]\n[[Category:Stone fruits]]"),
    (4, "Date", "Sweet."),
    (5, "Elderberry", "Dark purple."),
];

fn found(lookup: ArticleLookup) -> Arc<wikidex::Article> {
    match lookup {
        ArticleLookup::Found(article) => article,
        other => panic!("expected an article, got {other:?}"),
    }
}

#[test]
fn every_page_in_every_stream_resolves() {
    let (library, _fixture) = library_with_pages(PAGES);
    library.run_indexer().unwrap();
    assert_eq!(library.catalog().segments().len(), 3);

    for (_, title, _) in PAGES {
        let article = found(library.article(title));
        assert_eq!(article.title, *title);
        assert!(!article.content.is_empty());
    }
}

#[test]
fn markup_is_rendered() {
    let (library, _fixture) = library_with_pages(PAGES);
    library.run_indexer().unwrap();

    let apple = found(library.article("Apple"));
    assert!(apple.content.contains("<strong>Apple</strong>"));
    assert!(!apple.content.contains("[["));

    let cherry = found(library.article("Cherry"));
    assert_eq!(cherry.categories, vec!["Fruits", "Stone fruits"]);
    assert!(!cherry.content.contains("Category:"));
}

#[test]
fn raw_converter_returns_markup() {
    let (library, _fixture) = library_with_pages(PAGES);
    let library = library.with_converter(RawMarkup);
    library.run_indexer().unwrap();

    let banana = found(library.article("Banana"));
    assert!(banana.content.contains("''yellow''"));
}

#[test]
fn repeated_lookup_is_served_from_cache() {
    let (library, fixture) = library_with_pages(PAGES);
    library.run_indexer().unwrap();

    let first = found(library.article("Date"));
    std::fs::remove_file(fixture.dump_path()).unwrap();
    let second = found(library.article("Date"));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(library.cache().len(), 1);
}

#[test]
fn cache_keeps_most_recent() {
    let (library, _fixture) = library_with_config(PAGES, |config| config.cache_capacity = 2);
    library.run_indexer().unwrap();

    found(library.article("Apple"));
    found(library.article("Banana"));
    found(library.article("Apple"));
    found(library.article("Cherry"));

    let cache = library.cache();
    assert_eq!(cache.len(), 2);
    assert!(cache.contains("Apple"));
    assert!(cache.contains("Cherry"));
    assert!(!cache.contains("Banana"));
}

#[test]
fn titles_are_case_sensitive() {
    let (library, _fixture) = library_with_pages(PAGES);
    library.run_indexer().unwrap();
    assert!(matches!(library.article("apple"), ArticleLookup::NotFound));
}

#[test]
fn escaped_titles_round_trip_through_xml() {
    let mut builder = DumpBuilder::new();
    builder.push_header();
    builder.push_pages(&[(10, "AT&T", "Telephones."), (11, "C<D", "Less.")]);
    builder.push_footer();
    let fixture = builder.write_into(tempfile::tempdir().unwrap());

    let library = Library::open(fixture.config()).unwrap();
    library.run_indexer().unwrap();
    assert!(found(library.article("AT&T")).content.contains("Telephones."));
    assert!(found(library.article("C<D")).content.contains("Less."));
}
