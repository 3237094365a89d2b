// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Least-recently-used cache of rendered articles.
//!
//! A `get` promotes the entry, so even a lookup needs exclusive access; the
//! map lives behind a mutex rather than a read-write lock. Values are `Arc`s,
//! so the lock is held only for the map operation itself.

use std::sync::Arc;

use parking_lot::Mutex;
use schnellru::{ByLength, LruMap};

use crate::types::Article;

/// Fixed-capacity article cache keyed by exact title.
pub struct ArticleCache {
    map: Mutex<LruMap<String, Arc<Article>, ByLength>>,
    capacity: u32,
}

impl ArticleCache {
    /// A cache holding at most `capacity` articles (at least one).
    pub fn new(capacity: u32) -> Self {
        let capacity = capacity.max(1);
        Self {
            map: Mutex::new(LruMap::new(ByLength::new(capacity))),
            capacity,
        }
    }

    /// Cached article for `title`, promoted to most recently used.
    pub fn get(&self, title: &str) -> Option<Arc<Article>> {
        self.map.lock().get(title).map(|article| Arc::clone(article))
    }

    /// Insert or replace. Evicts the least recently used entry when full.
    pub fn put(&self, title: impl Into<String>, article: Arc<Article>) {
        self.map.lock().insert(title.into(), article);
    }

    /// Check membership without touching recency.
    pub fn contains(&self, title: &str) -> bool {
        self.map.lock().peek(title).is_some()
    }

    pub fn len(&self) -> usize {
        self.map.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
