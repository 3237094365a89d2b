//! Offline title search and article lookup over multistream encyclopedia dumps.
//!
//! A dump ships as two files: a bzip2-compressed index of `offset:page_id:title`
//! lines, and the article XML split into independently compressed bzip2
//! streams. The index is parsed in batches on a background thread; search and
//! lookup work from the first batch on and get more complete as batches land.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    batches    ┌─────────────┐     ┌──────────────┐
//! │ index_reader │──────────────▶│   Indexer   │────▶│   Catalog    │ title → (offset, id)
//! │ (bz2 lines)  │               │ (thread)    │     │ + status     │ + segment sizes
//! └──────────────┘               └─────────────┘     └──────────────┘
//!                                       │                    │
//!                                       ▼                    ▼
//!                                ┌─────────────┐     ┌──────────────┐
//!                                │ SearchIndex │     │ ArticleFetch │ Archive → extract
//!                                │ prefix/word │     │ + LRU cache  │ → markup → cache
//!                                └─────────────┘     └──────────────┘
//!                                       │                    │
//!                                       └────────┬───────────┘
//!                                                ▼
//!                                          ┌──────────┐
//!                                          │ Library  │
//!                                          └──────────┘
//! ```
//!
//! # Search tiers
//!
//! | Tier | Match                                   |
//! |------|-----------------------------------------|
//! | 0    | whole title, case-insensitive           |
//! | 1    | title starts with the query             |
//! | 2    | title contains the query                |
//! | 3    | a query word is a title word            |
//! | 4    | a query word is inside a title word     |
//!
//! # Usage
//!
//! ```ignore
//! use wikidex::{ArticleLookup, Config, Library};
//!
//! let library = Library::open(Config::from_data_dir("data"))?;
//! let indexer = library.spawn_indexer()?;
//!
//! for hit in library.search("ban") {
//!     println!("{} {}", hit.tier, hit.title);
//! }
//! if let ArticleLookup::Found(article) = library.article("Banana") {
//!     println!("{}", article.content);
//! }
//! indexer.cancel();
//! ```

pub mod archive;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod library;
pub mod markup;
pub mod search;
mod types;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use archive::{Archive, ExtractorChain, IndexSource, PageExtractor, PageTarget, SegmentMap};
pub use cache::ArticleCache;
pub use config::{Config, DUMP_FILE_NAME, INDEX_FILE_NAME};
pub use error::{ArchiveError, Error, FetchError, Result};
pub use fetch::ArticleFetcher;
pub use index::{
    Catalog, IndexOutcome, IndexReport, Indexer, IndexerHandle, SearchIndex, SharedSearchIndex,
};
pub use library::{group_thousands, ArticleLookup, Library};
pub use markup::{MarkupConverter, RawMarkup, Rendered, WikitextConverter};
pub use search::{search, TitleSearcher, MIN_QUERY_CHARS};
pub use types::{
    Article, IndexEntry, IndexingStatus, PageId, SearchHit, Tier, TitlePos, TitleRecord,
};
