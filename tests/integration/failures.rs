//! Missing files, corrupt indexes, and pages that are not where the index says.

use crate::common::memory_source;
use wikidex::testing::DumpBuilder;
use wikidex::{ArticleLookup, Config, Error, IndexSource, Library};

#[test]
fn open_without_files_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    match Library::open(Config::from_data_dir(dir.path())) {
        Err(Error::ConfigurationMissing { .. }) => {}
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("opened without files"),
    }
}

#[test]
fn unreadable_index_marks_unavailable() {
    let library = Library::new(Config::with_paths(
        "/nonexistent/index.txt.bz2",
        "/nonexistent/dump.xml.bz2",
    ));
    assert!(matches!(
        library.run_indexer(),
        Err(Error::IndexUnavailable(_))
    ));

    let status = library.status();
    assert!(status.is_unavailable());
    assert!(!status.is_loading());
    assert!(matches!(library.article("Apple"), ArticleLookup::NotFound));
    assert!(library.search("apple").is_empty());
}

#[test]
fn corrupt_bzip2_index_marks_unavailable() {
    let library = Library::new(Config::default());
    let source = IndexSource::memory(b"BZh91AY&SYnot really bzip2 at all".to_vec());
    assert!(library.indexer_from(source).run().is_err());
    assert!(library.status().is_unavailable());
}

#[test]
fn spawned_failure_surfaces_on_join() {
    let library = Library::new(Config::with_paths(
        "/nonexistent/index.txt.bz2",
        "/nonexistent/dump.xml.bz2",
    ));
    let handle = library.spawn_indexer().unwrap();
    assert!(matches!(handle.join(), Err(Error::IndexUnavailable(_))));
}

#[test]
fn index_pointing_at_missing_page() {
    let mut builder = DumpBuilder::new();
    builder.push_header();
    let offset = builder.push_pages(&[(1, "Apple", "Red.")]);
    builder.push_index_line(&format!("{offset}:99:Ghost"));
    let fixture = builder.write_into(tempfile::tempdir().unwrap());

    let library = Library::open(fixture.config()).unwrap();
    library.run_indexer().unwrap();

    assert!(matches!(library.article("Apple"), ArticleLookup::Found(_)));
    assert!(matches!(library.article("Ghost"), ArticleLookup::Unavailable));
    assert!(!library.cache().contains("Ghost"));
}

#[test]
fn malformed_lines_are_skipped() {
    let library = Library::new(Config::default());
    let report = library
        .indexer_from(memory_source(
            "100:1:Apple\nnot a record\n100:one:Bad\n:2:\n250:3:Banana\n",
        ))
        .run()
        .unwrap();

    assert_eq!(report.records, 2);
    assert_eq!(library.status().total, 5);
    assert!(library.catalog().contains("Banana"));
    assert!(!library.catalog().contains("Bad"));
}
