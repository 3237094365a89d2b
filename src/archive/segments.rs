// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Segment boundaries of the multistream dump.
//!
//! Every distinct offset in the index starts a bzip2 stream, and the next
//! larger offset is where that stream ends. So the number of bytes to read for
//! a page is just the gap to the next known offset. The last stream (and any
//! offset we have not seen in the index) gets a generous fixed window instead.

/// Read window for a segment with no known successor.
pub const DEFAULT_SEGMENT_SIZE: u64 = 2 * 1024 * 1024;

/// Sorted distinct stream offsets.
///
/// **Invariant**: `offsets` is strictly increasing, so the successor of
/// `offsets[i]` is `offsets[i + 1]`.
#[derive(Debug, Clone)]
pub struct SegmentMap {
    offsets: Vec<u64>,
    default_size: u64,
}

impl Default for SegmentMap {
    fn default() -> Self {
        Self::empty(DEFAULT_SEGMENT_SIZE)
    }
}

impl SegmentMap {
    /// A map that knows no boundaries; every lookup gets the default window.
    pub fn empty(default_size: u64) -> Self {
        Self {
            offsets: Vec::new(),
            default_size,
        }
    }

    /// Build from any collection of offsets (duplicates and order don't matter).
    pub fn from_offsets(offsets: impl IntoIterator<Item = u64>, default_size: u64) -> Self {
        let mut offsets: Vec<u64> = offsets.into_iter().collect();
        offsets.sort_unstable();
        offsets.dedup();
        offsets.shrink_to_fit();
        Self {
            offsets,
            default_size,
        }
    }

    /// Smallest known offset strictly greater than `offset`, if `offset` is a
    /// known segment start that is not the last one.
    pub fn next_offset(&self, offset: u64) -> Option<u64> {
        let idx = self.offsets.binary_search(&offset).ok()?;
        self.offsets.get(idx + 1).copied()
    }

    /// Bytes to read starting at `offset`.
    pub fn size_for(&self, offset: u64) -> u64 {
        match self.next_offset(offset) {
            Some(next) => next - offset,
            None => self.default_size,
        }
    }

    pub fn default_size(&self) -> u64 {
        self.default_size
    }

    /// Number of distinct segments.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn offsets(&self) -> &[u64] {
        &self.offsets
    }
}
