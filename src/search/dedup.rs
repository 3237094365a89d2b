// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result deduplication across tiers.
//!
//! A title should appear at most once in search results. The same title can
//! reach the merger several times: through the prefix bucket, through each of
//! the query's words, through several vocabulary fragments. It can even sit
//! at two positions in the index when the dump lists it twice. So the key is
//! the title text, never the position.
//!
//! Tiers are offered in order, so the first claim is also the best one.
//!
//! **Invariant**: each title appears at most once in the output.

use std::collections::HashSet;

use crate::types::{SearchHit, Tier};

/// Collects `(tier, title)` claims, first claim wins.
#[derive(Debug, Default)]
pub struct ResultMerger<'a> {
    seen: HashSet<&'a str>,
    hits: Vec<(Tier, &'a str)>,
}

impl<'a> ResultMerger<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `title` for `tier`. Returns `false` if it was already claimed.
    pub fn offer(&mut self, tier: Tier, title: &'a str) -> bool {
        if !self.seen.insert(title) {
            return false;
        }
        self.hits.push((tier, title));
        true
    }

    pub fn contains(&self, title: &str) -> bool {
        self.seen.contains(title)
    }

    /// Number of distinct titles claimed so far.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Sort by tier then case-insensitive title, and keep the first `limit`.
    ///
    /// The sort is stable: titles that compare equal ignoring case keep the
    /// order they were claimed in.
    pub fn into_sorted(self, limit: usize) -> Vec<SearchHit> {
        let mut keyed: Vec<(Tier, String, &str)> = self
            .hits
            .into_iter()
            .map(|(tier, title)| (tier, title.to_lowercase(), title))
            .collect();
        keyed.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
        keyed.truncate(limit);
        keyed
            .into_iter()
            .map(|(tier, _, title)| SearchHit::new(title.to_string(), tier))
            .collect()
    }
}
