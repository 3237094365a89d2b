// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The vocabulary shared by every stage of the lookup engine.
//!
//! An index line becomes an [`IndexEntry`], the catalog keeps a [`TitleRecord`]
//! per title, searches hand back [`SearchHit`]s ranked by [`Tier`], and fetches
//! hand back a rendered [`Article`]. Progress flows out through immutable
//! [`IndexingStatus`] snapshots.
//!
//! # Invariants
//!
//! - **TitleRecord**: once a title is in the catalog its record never changes.
//! - **IndexingStatus**: `indexed` never decreases between snapshots, and
//!   `complete` only ever goes from `false` to `true`.
//! - **TitlePos**: a position handed out by the search index is valid for the
//!   lifetime of the index. Titles are appended, never removed.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};
use std::fmt;

/// Position of a title in the append-only search title list.
pub type TitlePos = u32;

/// Identifier of a page inside the dump (`<id>` directly under `<page>`).
pub type PageId = u64;

// =============================================================================
// INDEX RECORDS
// =============================================================================

/// One parsed line of the multistream index: `offset:page_id:title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Byte offset of the compressed stream holding the page.
    pub offset: u64,
    pub page_id: PageId,
    pub title: String,
}

/// Where a title lives in the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TitleRecord {
    pub offset: u64,
    pub page_id: PageId,
}

impl From<&IndexEntry> for TitleRecord {
    fn from(entry: &IndexEntry) -> Self {
        Self {
            offset: entry.offset,
            page_id: entry.page_id,
        }
    }
}

// =============================================================================
// PROGRESS
// =============================================================================

/// Point-in-time view of the background indexer.
///
/// Snapshots are published whole, so a reader never sees `indexed` from one
/// batch paired with `current` from another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexingStatus {
    /// Distinct titles merged into the catalog so far.
    pub indexed: u64,
    /// Non-blank lines in the index, or [`IndexingStatus::UNAVAILABLE`].
    pub total: i64,
    /// Last title of the most recently merged batch.
    pub current: String,
    pub complete: bool,
}

impl IndexingStatus {
    /// Sentinel total meaning the index stream could not be read.
    pub const UNAVAILABLE: i64 = -1;

    pub fn is_unavailable(&self) -> bool {
        self.total == Self::UNAVAILABLE
    }

    /// Still loading and the total is known.
    pub fn is_loading(&self) -> bool {
        !self.complete && self.total > 0
    }

    /// Progress in percent, clamped to `0.0..=100.0`.
    pub fn percent(&self) -> f64 {
        if self.complete {
            return 100.0;
        }
        if self.total <= 0 {
            return 0.0;
        }
        (self.indexed as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// Relevance class of a search hit. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Tier {
    /// Case-insensitive match of the whole title.
    Exact = 0,
    /// Title starts with the query.
    Prefix = 1,
    /// Title shares the query's prefix bucket and contains the query.
    Substring = 2,
    /// Title contains one of the query's words as a whole word.
    Word = 3,
    /// Title contains a word that has the query inside it.
    Fragment = 4,
}

impl Tier {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Exact => "exact",
            Tier::Prefix => "prefix",
            Tier::Substring => "substring",
            Tier::Word => "word",
            Tier::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

/// A ranked title. The title doubles as the navigation target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub target: String,
    pub tier: Tier,
}

impl SearchHit {
    pub fn new(title: String, tier: Tier) -> Self {
        Self {
            target: title.clone(),
            title,
            tier,
        }
    }
}

/// Serialized as `[title, target]`, the shape search clients expect.
impl Serialize for SearchHit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.title)?;
        pair.serialize_element(&self.target)?;
        pair.end()
    }
}

// =============================================================================
// ARTICLES
// =============================================================================

/// A converted article ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    pub categories: Vec<String>,
}
