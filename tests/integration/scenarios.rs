//! Small fixed indexes with fully known answers.

use crate::common::{memory_source, titles};
use wikidex::{ArticleLookup, Config, IndexOutcome, Library};

fn config(batch_size: usize) -> Config {
    Config {
        batch_size,
        default_segment_size: 4096,
        ..Config::default()
    }
}

#[test]
fn three_titles_two_segments() {
    let library = Library::new(config(5000));
    let report = library
        .indexer_from(memory_source(
            "100:1:Apple\n250:2:Banana\n250:3:Banana Split\n",
        ))
        .run()
        .unwrap();

    assert_eq!(report.outcome, IndexOutcome::Completed);
    assert_eq!(report.records, 3);
    assert_eq!(report.segments, 2);

    let catalog = library.catalog();
    assert_eq!(catalog.len(), 3);
    let split = catalog.lookup("Banana Split").unwrap();
    assert_eq!((split.offset, split.page_id), (250, 3));

    let segments = catalog.segments();
    assert_eq!(segments.size_for(100), 150);
    assert_eq!(segments.size_for(250), 4096);

    assert_eq!(titles(&library.search("ban")), vec!["Banana", "Banana Split"]);
}

#[test]
fn absent_title_mid_index_reports_progress() {
    let lines: String = (0..1000)
        .map(|i| format!("{}:{}:Title {}\n", 100 + i / 100 * 1000, i + 1, i))
        .collect();
    let library = Library::new(config(5));
    let indexer = library.indexer_from(memory_source(&lines));
    indexer.cancel();
    let report = indexer.run().unwrap();
    assert_eq!(report.outcome, IndexOutcome::Cancelled);

    let lookup = library.article("Zebra");
    match &lookup {
        ArticleLookup::Pending { indexed, total } => assert_eq!((*indexed, *total), (5, 1000)),
        other => panic!("expected pending, got {other:?}"),
    }
    assert_eq!(
        lookup.message().unwrap(),
        "Article not indexed yet. Progress: 5 of 1,000 articles."
    );
}

#[test]
fn indexed_title_with_unreadable_dump() {
    let library = Library::new(Config {
        dump_path: "/nonexistent/dump.xml.bz2".into(),
        ..config(5000)
    });
    library
        .indexer_from(memory_source("100:1:Apple\n"))
        .run()
        .unwrap();

    let lookup = library.article("Apple");
    assert!(matches!(lookup, ArticleLookup::Unavailable));
    assert_eq!(lookup.message().unwrap(), "Could not load article content.");
    assert!(library.cache().is_empty());
}

#[test]
fn first_record_for_a_title_wins() {
    let library = Library::new(config(1));
    library
        .indexer_from(memory_source("100:1:Mercury\n900:2:Mercury\n"))
        .run()
        .unwrap();

    let record = library.catalog().lookup("Mercury").unwrap();
    assert_eq!((record.offset, record.page_id), (100, 1));
    assert_eq!(library.status().indexed, 1);
    assert_eq!(library.search("mercury").len(), 1);
}
