// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the structures that make lookup and search fast.
//!
//! Two structures, each filled one batch at a time by the indexer:
//! - **Catalog**: exact title to `(offset, page_id)`, plus progress and segment sizes
//! - **Search index**: title prefix buckets and word buckets for tiered search

pub mod catalog;
pub mod indexer;
pub mod search_index;

pub use catalog::Catalog;
pub use indexer::{IndexOutcome, IndexReport, Indexer, IndexerHandle};
pub use search_index::{SearchIndex, SharedSearchIndex};
