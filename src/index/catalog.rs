// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The title catalog: which titles exist and where they live.
//!
//! Titles, the segment map, and the progress snapshot sit behind one coarse
//! lock. The indexer takes the write side once per batch; lookups and status
//! polls take the read side and never wait on each other.
//!
//! Status is an `Arc<IndexingStatus>` swapped whole, so a poll is a read lock
//! plus a refcount bump. No copying of the current title on every poll.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::archive::segments::{SegmentMap, DEFAULT_SEGMENT_SIZE};
use crate::types::{IndexEntry, IndexingStatus, TitleRecord};

struct CatalogInner {
    titles: HashMap<String, TitleRecord>,
    segments: Arc<SegmentMap>,
    status: Arc<IndexingStatus>,
}

/// Shared title index plus segment map and progress.
pub struct Catalog {
    inner: RwLock<CatalogInner>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_SIZE)
    }
}

impl Catalog {
    /// Empty catalog. Until the segment map is published, every segment is
    /// read with `default_segment_size`.
    pub fn new(default_segment_size: u64) -> Self {
        Self {
            inner: RwLock::new(CatalogInner {
                titles: HashMap::new(),
                segments: Arc::new(SegmentMap::empty(default_segment_size)),
                status: Arc::new(IndexingStatus::default()),
            }),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn lookup(&self, title: &str) -> Option<TitleRecord> {
        self.inner.read().titles.get(title).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.inner.read().titles.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.inner.read().titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latest progress snapshot.
    pub fn status(&self) -> Arc<IndexingStatus> {
        Arc::clone(&self.inner.read().status)
    }

    pub fn segments(&self) -> Arc<SegmentMap> {
        Arc::clone(&self.inner.read().segments)
    }

    /// Record, segment size, and status read under a single lock, so the
    /// three always agree with each other.
    pub fn locate(&self, title: &str) -> (Option<(TitleRecord, u64)>, Arc<IndexingStatus>) {
        let inner = self.inner.read();
        let located = inner
            .titles
            .get(title)
            .map(|record| (*record, inner.segments.size_for(record.offset)));
        (located, Arc::clone(&inner.status))
    }

    // =========================================================================
    // WRITES (indexer only)
    // =========================================================================

    /// Publish the line count of the first pass.
    pub fn begin(&self, total: i64) {
        let mut inner = self.inner.write();
        let next = IndexingStatus {
            total,
            ..(*inner.status).clone()
        };
        inner.status = Arc::new(next);
    }

    /// Merge one batch. The first record seen for a title wins; later
    /// duplicates are ignored so a title never moves.
    ///
    /// Returns how many titles were new.
    pub fn merge_batch(&self, batch: &[IndexEntry]) -> usize {
        let mut inner = self.inner.write();
        let mut added = 0;
        for entry in batch {
            if let Entry::Vacant(slot) = inner.titles.entry(entry.title.clone()) {
                slot.insert(TitleRecord::from(entry));
                added += 1;
            }
        }

        let indexed = inner.titles.len() as u64;
        let current = batch
            .last()
            .map(|entry| entry.title.clone())
            .unwrap_or_else(|| inner.status.current.clone());
        let next = IndexingStatus {
            indexed,
            current,
            ..(*inner.status).clone()
        };
        inner.status = Arc::new(next);
        added
    }

    /// Install the segment map and flip `complete`. One-way.
    pub fn complete(&self, segments: SegmentMap) {
        let mut inner = self.inner.write();
        inner.segments = Arc::new(segments);
        let next = IndexingStatus {
            complete: true,
            ..(*inner.status).clone()
        };
        inner.status = Arc::new(next);
    }

    /// Mark indexing as unavailable (total = -1). Titles already merged stay.
    pub fn mark_unavailable(&self) {
        let mut inner = self.inner.write();
        let next = IndexingStatus {
            total: IndexingStatus::UNAVAILABLE,
            ..(*inner.status).clone()
        };
        inner.status = Arc::new(next);
    }
}
