// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Title search structures, built batch by batch.
//!
//! Four structures, all keyed by a title's position in one append-only list:
//!
//! | Structure   | Key                         | Value                 |
//! |-------------|-----------------------------|-----------------------|
//! | `titles`    | position                    | canonical title       |
//! | `exact`     | lowercase title             | position (last wins)  |
//! | `prefixes`  | 2- and 3-char lowercase head| positions             |
//! | `words`     | lowercase token, ≥ 2 chars  | positions             |
//!
//! Words go in whole. Indexing every substring of every word is what makes
//! memory explode on twenty million titles; substring queries are answered by
//! scanning the (much smaller) vocabulary instead.
//!
//! Positions only ever grow, so each bucket is a sorted `Vec` and "set insert"
//! is a check against the last element.

use std::collections::HashMap;

use parking_lot::{RwLock, RwLockReadGuard};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::types::TitlePos;

/// Title prefixes of non-article namespaces. These stay out of search but
/// remain directly addressable by title.
pub const RESERVED_NAMESPACES: &[&str] = &[
    "Template:",
    "File:",
    "User:",
    "Talk:",
    "Wikipedia:",
    "Help:",
    "Portal:",
];

/// Shortest token that goes into the word index.
pub const MIN_WORD_CHARS: usize = 2;

pub fn is_reserved_namespace(title: &str) -> bool {
    RESERVED_NAMESPACES
        .iter()
        .any(|prefix| title.starts_with(prefix))
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | ',' | '.' | '(' | ')' | '[' | ']')
}

/// Split a lowercase title into indexable words.
pub fn tokenize(lower: &str) -> impl Iterator<Item = &str> {
    lower
        .split(is_word_separator)
        .filter(|word| word.chars().nth(MIN_WORD_CHARS - 1).is_some())
}

/// The first `chars` characters of `text`, if it has that many.
pub fn char_prefix(text: &str, chars: usize) -> Option<&str> {
    match text.char_indices().nth(chars) {
        Some((end, _)) => Some(&text[..end]),
        None if text.chars().count() == chars => Some(text),
        None => None,
    }
}

fn push_unique(bucket: &mut Vec<TitlePos>, pos: TitlePos) {
    if bucket.last() != Some(&pos) {
        bucket.push(pos);
    }
}

/// Unsynchronized search structures. See [`SharedSearchIndex`] for the
/// concurrent wrapper.
#[derive(Debug, Default)]
pub struct SearchIndex {
    titles: Vec<String>,
    exact: HashMap<String, TitlePos>,
    prefixes: HashMap<String, Vec<TitlePos>>,
    words: HashMap<String, Vec<TitlePos>>,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of titles, skipping reserved namespaces.
    ///
    /// Returns how many titles were accepted.
    pub fn ingest<I, S>(&mut self, titles: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.titles.len();
        for title in titles {
            let title = title.as_ref();
            if !is_reserved_namespace(title) {
                self.push(title);
            }
        }
        self.titles.len() - before
    }

    fn push(&mut self, title: &str) {
        let pos = self.titles.len() as TitlePos;
        let lower = title.to_lowercase();

        for len in [2, 3] {
            if let Some(head) = char_prefix(&lower, len) {
                push_unique(self.prefixes.entry(head.to_string()).or_default(), pos);
            }
        }
        for word in tokenize(&lower) {
            push_unique(self.words.entry(word.to_string()).or_default(), pos);
        }

        self.exact.insert(lower, pos);
        self.titles.push(title.to_string());
    }

    /// Number of searchable titles.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Title at `pos`, or `None` if the position is out of range.
    pub fn title(&self, pos: TitlePos) -> Option<&str> {
        self.titles.get(pos as usize).map(String::as_str)
    }

    /// Canonical title for a lowercase title.
    pub fn exact(&self, lower: &str) -> Option<&str> {
        self.exact.get(lower).and_then(|&pos| self.title(pos))
    }

    /// Positions of titles starting with a 2- or 3-char lowercase `head`.
    pub fn prefix_bucket(&self, head: &str) -> &[TitlePos] {
        self.prefixes.get(head).map_or(&[], Vec::as_slice)
    }

    /// Positions of titles containing `word` as a whole word.
    pub fn word_bucket(&self, word: &str) -> &[TitlePos] {
        self.words.get(word).map_or(&[], Vec::as_slice)
    }

    /// Every indexed word with its positions, in no particular order.
    pub fn vocabulary(&self) -> impl Iterator<Item = (&str, &[TitlePos])> {
        self.words
            .iter()
            .map(|(word, positions)| (word.as_str(), positions.as_slice()))
    }

    /// Indexed words containing `fragment`, sorted by word.
    ///
    /// This walks the whole vocabulary. Nothing caps it.
    pub fn words_containing(&self, fragment: &str) -> Vec<(&str, &[TitlePos])> {
        #[cfg(feature = "rayon")]
        let mut found: Vec<(&str, &[TitlePos])> = self
            .words
            .par_iter()
            .filter(|(word, _)| word.contains(fragment))
            .map(|(word, positions)| (word.as_str(), positions.as_slice()))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let mut found: Vec<(&str, &[TitlePos])> = self
            .vocabulary()
            .filter(|(word, _)| word.contains(fragment))
            .collect();

        found.sort_unstable_by(|a, b| a.0.cmp(b.0));
        found
    }

    pub fn vocabulary_len(&self) -> usize {
        self.words.len()
    }

    pub fn prefix_key_count(&self) -> usize {
        self.prefixes.len()
    }
}

/// Search index behind a coarse read-write lock.
///
/// Ingest holds the write side for a whole batch; a search holds the read
/// side for the whole query, so it sees bucket positions and the title list
/// from the same moment.
#[derive(Debug, Default)]
pub struct SharedSearchIndex {
    inner: RwLock<SearchIndex>,
}

impl SharedSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest<I, S>(&self, titles: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.write().ingest(titles)
    }

    /// Read access for the duration of a query.
    pub fn read(&self) -> RwLockReadGuard<'_, SearchIndex> {
        self.inner.read()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
