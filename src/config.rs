// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime configuration.
//!
//! Everything has a default tuned for the full English dump: 5000-record
//! batches, a 100-article cache, 50 results per query, and a 2 MiB read
//! window for segments whose end is not known yet.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::archive::segments::DEFAULT_SEGMENT_SIZE;
use crate::error::{Error, Result};

/// File name of the multistream index inside a data directory.
pub const INDEX_FILE_NAME: &str = "enwiki-pages-articles-multistream-index.txt.bz2";

/// File name of the multistream dump inside a data directory.
pub const DUMP_FILE_NAME: &str = "enwiki-pages-articles-multistream.xml.bz2";

/// Engine configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the `offset:page_id:title` index (bzip2 or plain text).
    pub index_path: PathBuf,
    /// Path to the multistream XML dump.
    pub dump_path: PathBuf,
    /// Records merged per batch.
    pub batch_size: usize,
    /// Rendered articles kept in memory.
    pub cache_capacity: u32,
    /// Default number of search results.
    pub max_results: usize,
    /// Bytes read for a segment with no known successor.
    pub default_segment_size: u64,
    /// Log a progress line every this many records.
    pub progress_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_data_dir("data")
    }
}

impl Config {
    /// Configuration using the conventional dump file names under `dir`.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            index_path: dir.join(INDEX_FILE_NAME),
            dump_path: dir.join(DUMP_FILE_NAME),
            batch_size: 5000,
            cache_capacity: 100,
            max_results: 50,
            default_segment_size: DEFAULT_SEGMENT_SIZE,
            progress_interval: 50_000,
        }
    }

    /// Configuration with explicit file paths and default tuning.
    pub fn with_paths(index_path: impl Into<PathBuf>, dump_path: impl Into<PathBuf>) -> Self {
        Self {
            index_path: index_path.into(),
            dump_path: dump_path.into(),
            ..Self::default()
        }
    }

    /// Check that both input files exist and the tuning values are usable.
    ///
    /// A missing file is fatal: there is no partial mode without the index
    /// or the dump.
    pub fn validate(&self) -> Result<()> {
        if !self.index_path.is_file() {
            return Err(Error::ConfigurationMissing {
                what: "index file",
                path: self.index_path.clone(),
            });
        }
        if !self.dump_path.is_file() {
            return Err(Error::ConfigurationMissing {
                what: "dump file",
                path: self.dump_path.clone(),
            });
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be at least 1".into()));
        }
        if self.cache_capacity == 0 {
            return Err(Error::InvalidConfig("cache_capacity must be at least 1".into()));
        }
        if self.default_segment_size == 0 {
            return Err(Error::InvalidConfig(
                "default_segment_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
