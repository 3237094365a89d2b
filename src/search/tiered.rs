// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The tiered title search: exact → prefix → substring → word → fragment.
//!
//! Tier 0 is one hash lookup. Tiers 1 and 2 scan a single prefix bucket, so
//! their cost is the bucket size. Tier 3 looks up each query word as a whole
//! word. All of these stop early once `2 × limit` titles are collected.
//!
//! Tier 4 is different. It walks the entire word vocabulary looking for words
//! that contain the query. That's millions of string checks on a full dump,
//! which is why it only runs when the earlier tiers came up short. With the
//! `rayon` feature the walk is spread across the thread pool. There is no
//! time cap; a slow fragment query runs to completion.
//!
//! | Tier | Source              | Per-source cap | Runs when            |
//! |------|---------------------|----------------|----------------------|
//! | 0    | exact map           | 1              | always               |
//! | 1, 2 | prefix bucket       | whole bucket   | always               |
//! | 3    | word bucket         | `3 × limit`    | fewer than `limit`   |
//! | 4    | vocabulary scan     | `limit`        | still fewer          |

use std::sync::Arc;
use std::time::Instant;

use tracing::debug;

use super::dedup::ResultMerger;
use crate::index::search_index::{char_prefix, SearchIndex, SharedSearchIndex};
use crate::types::{SearchHit, Tier};

/// Queries shorter than this (in characters) return nothing.
pub const MIN_QUERY_CHARS: usize = 2;

/// Longest prefix used as a bucket key.
const BUCKET_KEY_CHARS: usize = 3;

/// Run the full tiered search against one index snapshot.
pub fn search(index: &SearchIndex, query: &str, limit: usize) -> Vec<SearchHit> {
    if limit == 0 || query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let lower = query.to_lowercase();
    let ceiling = limit.saturating_mul(2);
    let mut merger = ResultMerger::new();

    exact_tier(index, &lower, &mut merger);
    prefix_tiers(index, &lower, ceiling, &mut merger);

    if merger.len() < limit {
        word_tier(index, &lower, limit, ceiling, &mut merger);
        if merger.len() < limit {
            fragment_tier(index, &lower, limit, ceiling, &mut merger);
        }
    }

    merger.into_sorted(limit)
}

// =============================================================================
// TIERS
// =============================================================================

fn exact_tier<'a>(index: &'a SearchIndex, lower: &str, merger: &mut ResultMerger<'a>) {
    if let Some(title) = index.exact(lower) {
        merger.offer(Tier::Exact, title);
    }
}

/// Tiers 1 and 2 share one bucket scan.
fn prefix_tiers<'a>(
    index: &'a SearchIndex,
    lower: &str,
    ceiling: usize,
    merger: &mut ResultMerger<'a>,
) {
    let key = char_prefix(lower, BUCKET_KEY_CHARS).unwrap_or(lower);
    for &pos in index.prefix_bucket(key) {
        if let Some(title) = index.title(pos) {
            if !merger.contains(title) {
                let title_lower = title.to_lowercase();
                if title_lower.starts_with(lower) {
                    merger.offer(Tier::Prefix, title);
                } else if title_lower.contains(lower) {
                    merger.offer(Tier::Substring, title);
                }
            }
        }
        if merger.len() >= ceiling {
            break;
        }
    }
}

fn word_tier<'a>(
    index: &'a SearchIndex,
    lower: &str,
    limit: usize,
    ceiling: usize,
    merger: &mut ResultMerger<'a>,
) {
    let per_word = limit.saturating_mul(3);
    for word in lower.split_whitespace() {
        for &pos in index.word_bucket(word).iter().take(per_word) {
            if let Some(title) = index.title(pos) {
                merger.offer(Tier::Word, title);
            }
        }
        if merger.len() >= ceiling {
            break;
        }
    }
}

fn fragment_tier<'a>(
    index: &'a SearchIndex,
    lower: &str,
    limit: usize,
    ceiling: usize,
    merger: &mut ResultMerger<'a>,
) {
    for (_, positions) in index.words_containing(lower) {
        for &pos in positions.iter().take(limit) {
            if let Some(title) = index.title(pos) {
                merger.offer(Tier::Fragment, title);
            }
        }
        if merger.len() >= ceiling {
            break;
        }
    }
}

// =============================================================================
// SHARED SEARCHER
// =============================================================================

/// Searches a [`SharedSearchIndex`] while it is still being built.
///
/// Each query holds the read lock from the first bucket lookup to the last
/// title resolution, so it never sees a position without its title.
#[derive(Debug, Clone)]
pub struct TitleSearcher {
    index: Arc<SharedSearchIndex>,
    default_limit: usize,
}

impl TitleSearcher {
    pub fn new(index: Arc<SharedSearchIndex>, default_limit: usize) -> Self {
        Self {
            index,
            default_limit,
        }
    }

    /// Search with the configured result limit.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.search_with_limit(query, self.default_limit)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let start = Instant::now();
        let hits = {
            let index = self.index.read();
            search(&index, query, limit)
        };
        debug!(
            query,
            limit,
            hits = hits.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search"
        );
        hits
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }
}
