//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::thread;
use std::time::{Duration, Instant};

use tempfile::TempDir;
use wikidex::testing::{DumpBuilder, DumpFixture};
use wikidex::{Config, IndexSource, Library, SearchHit, SearchIndex, Tier};

// ============================================================================
// SEARCH FIXTURES
// ============================================================================

/// A search index holding `titles` in order.
pub fn index_of(titles: &[&str]) -> SearchIndex {
    let mut index = SearchIndex::new();
    index.ingest(titles);
    index
}

pub fn titles(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|hit| hit.title.as_str()).collect()
}

pub fn tiers(hits: &[SearchHit]) -> Vec<Tier> {
    hits.iter().map(|hit| hit.tier).collect()
}

/// Index text with one `offset:id:title` line per title, all in one segment.
pub fn index_text(titles: &[&str]) -> String {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| format!("100:{}:{}\n", i + 1, title))
        .collect()
}

pub fn memory_source(text: &str) -> IndexSource {
    IndexSource::memory(text.as_bytes().to_vec())
}

// ============================================================================
// LIBRARY FIXTURES
// ============================================================================

/// A dump on disk with `pages` packed two per stream, plus a library over it.
pub fn library_with_pages(pages: &[(u64, &str, &str)]) -> (Library, DumpFixture<TempDir>) {
    library_with_config(pages, |_| {})
}

pub fn library_with_config(
    pages: &[(u64, &str, &str)],
    tune: impl FnOnce(&mut Config),
) -> (Library, DumpFixture<TempDir>) {
    let mut builder = DumpBuilder::new();
    builder.push_header();
    for chunk in pages.chunks(2) {
        builder.push_pages(chunk);
    }
    builder.push_footer();
    let fixture = builder.write_into(tempfile::tempdir().expect("temp dir"));

    let mut config = fixture.config();
    tune(&mut config);
    let library = Library::open(config).expect("fixture files exist");
    (library, fixture)
}

/// Poll `condition` until it holds or `timeout` passes.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
