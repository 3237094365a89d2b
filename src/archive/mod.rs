// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Random access into a multistream dump.
//!
//! The dump is a concatenation of independently compressed bzip2 streams, each
//! holding a handful of pages. The index tells us which stream a title lives
//! in, the segment map tells us how long that stream is, and the reader pulls
//! exactly those bytes off disk and decompresses them. Nothing else of the
//! (very large) dump is ever touched.
//!
//! ```text
//! index line ──▶ IndexEntry ──▶ offset ──▶ SegmentMap::size_for ──▶ Archive::read_segment
//!                                                                        │
//!                                                   ExtractorChain ◀─────┘ (XML window)
//! ```

pub mod extract;
pub mod index_reader;
pub mod reader;
pub mod segments;

pub use extract::{ExtractorChain, PageExtractor, PageTarget, PatternPageExtractor, XmlPageExtractor};
pub use index_reader::{count_records, parse_line, IndexLines, IndexSource};
pub use reader::Archive;
pub use segments::{SegmentMap, DEFAULT_SEGMENT_SIZE};
