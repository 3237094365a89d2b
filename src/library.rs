// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The lookup surface: one object owning every shared structure.
//!
//! Nothing here is global. A [`Library`] owns the catalog, the search index,
//! and the cache, and hands `Arc`s to the indexer it spawns. Two libraries in
//! one process don't know about each other.
//!
//! # Usage
//!
//! ```ignore
//! let library = Library::open(Config::from_data_dir("data"))?;
//! let indexer = library.spawn_indexer()?;
//!
//! // Usable immediately; results grow as batches land.
//! let hits = library.search("ban");
//! match library.article("Banana") {
//!     ArticleLookup::Found(article) => println!("{}", article.content),
//!     other => println!("{}", other.message().unwrap_or_default()),
//! }
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::archive::index_reader::IndexSource;
use crate::archive::reader::Archive;
use crate::cache::ArticleCache;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fetch::ArticleFetcher;
use crate::index::catalog::Catalog;
use crate::index::indexer::{IndexReport, Indexer, IndexerHandle};
use crate::index::search_index::SharedSearchIndex;
use crate::markup::MarkupConverter;
use crate::search::TitleSearcher;
use crate::types::{Article, IndexingStatus, SearchHit};

/// Result of looking up an article by exact title.
#[derive(Debug, Clone)]
pub enum ArticleLookup {
    Found(Arc<Article>),
    /// Not in the catalog yet, but indexing is still running.
    Pending { indexed: u64, total: i64 },
    /// Not in the catalog, and indexing is done (or never started).
    NotFound,
    /// In the catalog, but the archive read or page extraction failed.
    Unavailable,
}

impl ArticleLookup {
    /// User-facing notice for every outcome except `Found`.
    pub fn message(&self) -> Option<String> {
        match self {
            ArticleLookup::Found(_) => None,
            ArticleLookup::Pending { indexed, total } => Some(format!(
                "Article not indexed yet. Progress: {} of {} articles.",
                group_thousands(*indexed),
                group_thousands((*total).max(0) as u64),
            )),
            ArticleLookup::NotFound => Some("Article not found.".to_string()),
            ArticleLookup::Unavailable => Some("Could not load article content.".to_string()),
        }
    }

    pub fn article(&self) -> Option<&Arc<Article>> {
        match self {
            ArticleLookup::Found(article) => Some(article),
            _ => None,
        }
    }
}

/// `1234567` → `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Search and article lookup over one dump.
pub struct Library {
    config: Config,
    catalog: Arc<Catalog>,
    search_index: Arc<SharedSearchIndex>,
    searcher: TitleSearcher,
    fetcher: ArticleFetcher,
}

impl Library {
    /// Validate `config` and build an empty library. Fails if either input
    /// file is missing.
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Build without touching the filesystem.
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(Catalog::new(config.default_segment_size));
        let search_index = Arc::new(SharedSearchIndex::new());
        let cache = Arc::new(ArticleCache::new(config.cache_capacity));
        let searcher = TitleSearcher::new(Arc::clone(&search_index), config.max_results);
        let fetcher = ArticleFetcher::new(
            Archive::new(&config.dump_path),
            Arc::clone(&catalog),
            cache,
        );
        Self {
            config,
            catalog,
            search_index,
            searcher,
            fetcher,
        }
    }

    /// Replace the markup converter used for new fetches.
    pub fn with_converter(self, converter: impl MarkupConverter + 'static) -> Self {
        Self {
            fetcher: self.fetcher.with_converter(converter),
            ..self
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn search_index(&self) -> &Arc<SharedSearchIndex> {
        &self.search_index
    }

    pub fn cache(&self) -> &ArticleCache {
        self.fetcher.cache()
    }

    // =========================================================================
    // INDEXING
    // =========================================================================

    /// An indexer over the configured index file.
    pub fn indexer(&self) -> Indexer {
        self.indexer_from(IndexSource::file(&self.config.index_path))
    }

    /// An indexer over any source, feeding this library.
    pub fn indexer_from(&self, source: IndexSource) -> Indexer {
        Indexer::new(
            source,
            Arc::clone(&self.catalog),
            Arc::clone(&self.search_index),
            &self.config,
        )
    }

    /// Start indexing the configured index file in the background.
    pub fn spawn_indexer(&self) -> Result<IndexerHandle> {
        self.indexer().spawn().map_err(Error::IndexUnavailable)
    }

    /// Index the configured file on the calling thread.
    pub fn run_indexer(&self) -> Result<IndexReport> {
        self.indexer().run()
    }

    /// Latest progress snapshot. Cheap enough to poll every frame.
    pub fn status(&self) -> Arc<IndexingStatus> {
        self.catalog.status()
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Ranked titles for `query`, at most `max_results`.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.searcher.search(query)
    }

    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        self.searcher.search_with_limit(query, limit)
    }

    /// Look up an article by exact, case-sensitive title.
    pub fn article(&self, title: &str) -> ArticleLookup {
        if let Some(article) = self.fetcher.cache().get(title) {
            return ArticleLookup::Found(article);
        }

        let (located, status) = self.catalog.locate(title);
        let Some((record, size)) = located else {
            return if status.is_loading() {
                ArticleLookup::Pending {
                    indexed: status.indexed,
                    total: status.total,
                }
            } else {
                ArticleLookup::NotFound
            };
        };

        match self.fetcher.load(title, record, size) {
            Ok(article) => ArticleLookup::Found(article),
            Err(err) => {
                debug!(title, error = %err, "article content unavailable");
                ArticleLookup::Unavailable
            }
        }
    }
}
