// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for configuration, index reading, and article fetching.
//!
//! Only [`Error::ConfigurationMissing`] is meant to stop the process. Everything
//! else degrades: a broken index stream turns into an "unavailable" status, and
//! a broken archive read turns into "content unavailable" for one title.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for wikidex operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{what} not found: {}", path.display())]
    ConfigurationMissing { what: &'static str, path: PathBuf },

    #[error("index stream unavailable: {0}")]
    IndexUnavailable(#[source] io::Error),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for wikidex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while reading or decompressing one archive segment.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("{}: cannot open archive: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("seek to offset {offset} failed: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("read of {size} bytes at offset {offset} failed: {source}")]
    Read {
        offset: u64,
        size: u64,
        #[source]
        source: io::Error,
    },

    #[error("segment at offset {offset} did not decompress: {source}")]
    Decompress {
        offset: u64,
        #[source]
        source: io::Error,
    },

    #[error("segment at offset {offset} is empty")]
    EmptySegment { offset: u64 },
}

/// Why an indexed title could not be turned into an article.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error("page {title:?} (id {page_id}) not located in segment at offset {offset}")]
    NotLocated {
        title: String,
        page_id: u64,
        offset: u64,
    },
}
