// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! From title to rendered article.
//!
//! ```text
//! cache ─hit─► done
//!   │miss
//! catalog.locate ─► Archive::read_segment ─► ExtractorChain ─► MarkupConverter ─► cache
//! ```
//!
//! A cached title never touches the archive. The catalog lookup, segment
//! read, extraction, and conversion all happen outside any shared lock, so
//! two slow fetches don't serialize each other.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::archive::extract::{ExtractorChain, PageTarget};
use crate::archive::reader::Archive;
use crate::cache::ArticleCache;
use crate::error::FetchError;
use crate::index::catalog::Catalog;
use crate::markup::{MarkupConverter, WikitextConverter};
use crate::types::{Article, TitleRecord};

/// Fetches, renders, and caches articles.
pub struct ArticleFetcher {
    archive: Archive,
    catalog: Arc<Catalog>,
    cache: Arc<ArticleCache>,
    extractors: ExtractorChain,
    converter: Box<dyn MarkupConverter>,
}

impl ArticleFetcher {
    /// Fetcher with the default extractor chain and the wikitext converter.
    pub fn new(archive: Archive, catalog: Arc<Catalog>, cache: Arc<ArticleCache>) -> Self {
        Self {
            archive,
            catalog,
            cache,
            extractors: ExtractorChain::default(),
            converter: Box::new(WikitextConverter),
        }
    }

    pub fn with_converter(mut self, converter: impl MarkupConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn with_extractors(mut self, extractors: ExtractorChain) -> Self {
        self.extractors = extractors;
        self
    }

    pub fn cache(&self) -> &ArticleCache {
        &self.cache
    }

    /// Fetch `title`. `Ok(None)` means the title is not in the catalog.
    pub fn fetch(&self, title: &str) -> Result<Option<Arc<Article>>, FetchError> {
        if let Some(article) = self.cache.get(title) {
            trace!(title, "article cache hit");
            return Ok(Some(article));
        }
        let (located, _) = self.catalog.locate(title);
        match located {
            Some((record, size)) => self.load(title, record, size).map(Some),
            None => Ok(None),
        }
    }

    /// Read, extract, convert, and cache an article whose location is known.
    pub fn load(
        &self,
        title: &str,
        record: TitleRecord,
        size: u64,
    ) -> Result<Arc<Article>, FetchError> {
        let xml = self.archive.read_segment(record.offset, size)?;
        debug!(title, offset = record.offset, size, decoded = xml.len(), "segment read");

        let target = PageTarget::new(title, record.page_id);
        let raw = self
            .extractors
            .extract(&xml, &target)
            .ok_or_else(|| FetchError::NotLocated {
                title: title.to_string(),
                page_id: record.page_id,
                offset: record.offset,
            })?;

        let article = Arc::new(self.converter.convert(&raw).into_article(title));
        self.cache.put(title, Arc::clone(&article));
        Ok(article)
    }
}
