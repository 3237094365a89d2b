// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Progressive indexing of the multistream index.
//!
//! Two passes over the same source. The first only counts lines, so progress
//! can be shown as "x of y" from the start. The second parses lines into
//! batches and publishes each batch to the catalog and the search index the
//! moment it is full. A lookup for a title in batch one works while batch two
//! is still being read.
//!
//! Once the stream ends, the distinct offsets seen become the segment map and
//! the status flips to complete. If either pass fails to read, the status is
//! marked unavailable; titles that already made it in stay searchable.
//!
//! ```text
//! count ──► begin(total)
//!             │
//! parse ──► [batch] ──► catalog.merge_batch ──► search.ingest ──► ...
//!             │
//!             └─► SegmentMap::from_offsets ──► catalog.complete
//! ```

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::catalog::Catalog;
use super::search_index::SharedSearchIndex;
use crate::archive::index_reader::{count_records, IndexSource};
use crate::archive::segments::SegmentMap;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::IndexEntry;

/// How an indexing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The whole stream was read and the segment map is installed.
    Completed,
    /// [`IndexerHandle::cancel`] was called before the stream ended.
    Cancelled,
}

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct IndexReport {
    pub outcome: IndexOutcome,
    /// Well-formed records parsed.
    pub records: u64,
    /// Distinct titles in the catalog.
    pub titles: usize,
    /// Distinct segment offsets.
    pub segments: usize,
    pub elapsed: Duration,
}

/// Builds the catalog and search index from an index source.
pub struct Indexer {
    source: IndexSource,
    catalog: Arc<Catalog>,
    search: Arc<SharedSearchIndex>,
    batch_size: usize,
    progress_interval: u64,
    default_segment_size: u64,
    cancel: Arc<AtomicBool>,
}

impl Indexer {
    pub fn new(
        source: IndexSource,
        catalog: Arc<Catalog>,
        search: Arc<SharedSearchIndex>,
        config: &Config,
    ) -> Self {
        Self {
            source,
            catalog,
            search,
            batch_size: config.batch_size.max(1),
            progress_interval: config.progress_interval.max(1),
            default_segment_size: config.default_segment_size,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Run both passes on the calling thread.
    ///
    /// A read failure marks the catalog unavailable before returning
    /// [`Error::IndexUnavailable`].
    pub fn run(&self) -> Result<IndexReport> {
        let start = Instant::now();
        match self.index(start) {
            Ok(report) => Ok(report),
            Err(err) => {
                warn!(error = %err, "index stream unavailable");
                self.catalog.mark_unavailable();
                Err(Error::IndexUnavailable(err))
            }
        }
    }

    /// Run on a dedicated background thread.
    pub fn spawn(self) -> io::Result<IndexerHandle> {
        let cancel = Arc::clone(&self.cancel);
        let thread = thread::Builder::new()
            .name("wikidex-indexer".into())
            .spawn(move || self.run())?;
        Ok(IndexerHandle { cancel, thread })
    }

    /// Ask the run to stop after the current batch. Works before `run` too.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn index(&self, start: Instant) -> io::Result<IndexReport> {
        let total = count_records(&self.source)?;
        self.catalog.begin(total as i64);
        info!(total, "counted index records");

        let mut batch: Vec<IndexEntry> = Vec::with_capacity(self.batch_size);
        let mut offsets: Vec<u64> = Vec::new();
        let mut records: u64 = 0;
        let mut next_report = self.progress_interval;

        for entry in self.source.open()?.entries() {
            let entry = entry?;
            // Offsets arrive in stream order, so consecutive dedup keeps this small.
            if offsets.last() != Some(&entry.offset) {
                offsets.push(entry.offset);
            }
            batch.push(entry);
            records += 1;

            if batch.len() >= self.batch_size {
                self.publish(&mut batch);
                if records >= next_report {
                    self.report_progress(total);
                    next_report = records + self.progress_interval;
                }
                if self.cancelled() {
                    info!(records, "indexing cancelled");
                    return Ok(self.report(IndexOutcome::Cancelled, records, 0, start));
                }
            }
        }
        self.publish(&mut batch);

        let segments = SegmentMap::from_offsets(offsets, self.default_segment_size);
        let segment_count = segments.len();
        self.catalog.complete(segments);

        let report = self.report(IndexOutcome::Completed, records, segment_count, start);
        info!(
            records,
            titles = report.titles,
            segments = segment_count,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "indexing complete"
        );
        Ok(report)
    }

    /// Catalog first, then search: a title that shows up in results is
    /// always resolvable.
    fn publish(&self, batch: &mut Vec<IndexEntry>) {
        if batch.is_empty() {
            return;
        }
        let added = self.catalog.merge_batch(batch);
        let searchable = self.search.ingest(batch.iter().map(|entry| &entry.title));
        debug!(batch = batch.len(), added, searchable, "batch merged");
        batch.clear();
    }

    fn report_progress(&self, total: u64) {
        let status = self.catalog.status();
        info!(
            indexed = status.indexed,
            total,
            percent = format_args!("{:.1}", status.percent()),
            current = %status.current,
            "indexing"
        );
    }

    fn report(
        &self,
        outcome: IndexOutcome,
        records: u64,
        segments: usize,
        start: Instant,
    ) -> IndexReport {
        IndexReport {
            outcome,
            records,
            titles: self.catalog.len(),
            segments,
            elapsed: start.elapsed(),
        }
    }
}

/// Handle to a background indexing run.
pub struct IndexerHandle {
    cancel: Arc<AtomicBool>,
    thread: JoinHandle<Result<IndexReport>>,
}

impl IndexerHandle {
    /// Ask the run to stop after the current batch.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the run to end.
    pub fn join(self) -> Result<IndexReport> {
        self.thread.join().unwrap_or_else(|_| {
            Err(Error::IndexUnavailable(io::Error::other(
                "indexer thread panicked",
            )))
        })
    }
}
