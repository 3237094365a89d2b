// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded reads from the compressed dump.
//!
//! One read per fetch: seek, read at most `size` bytes, decompress the first
//! bzip2 stream in them. When the window was a guess (the last segment, or
//! before the segment map exists) the stream may be cut short; whatever
//! decompressed cleanly before the cut is still returned.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use bzip2::read::BzDecoder;
use tracing::debug;

use crate::error::ArchiveError;

/// Handle to the multistream dump on disk.
///
/// Each read opens its own file handle, so concurrent fetches never contend
/// on a shared cursor.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
}

impl Archive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `size` compressed bytes at `offset` and return the decoded text.
    pub fn read_segment(&self, offset: u64, size: u64) -> Result<String, ArchiveError> {
        let compressed = self.read_raw(offset, size)?;
        let decoded = decompress_segment(&compressed, offset)?;
        Ok(String::from_utf8_lossy(&decoded).into_owned())
    }

    /// Read at most `size` raw bytes at `offset`. Short reads at end of file
    /// are fine; an empty read is not.
    pub fn read_raw(&self, offset: u64, size: u64) -> Result<Vec<u8>, ArchiveError> {
        let mut file = File::open(&self.path).map_err(|source| ArchiveError::Open {
            path: self.path.clone(),
            source,
        })?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|source| ArchiveError::Seek { offset, source })?;

        let mut compressed = Vec::with_capacity(size.min(64 * 1024 * 1024) as usize);
        file.take(size)
            .read_to_end(&mut compressed)
            .map_err(|source| ArchiveError::Read {
                offset,
                size,
                source,
            })?;

        if compressed.is_empty() {
            return Err(ArchiveError::EmptySegment { offset });
        }
        Ok(compressed)
    }
}

/// Decompress the first bzip2 stream in `compressed`.
///
/// Truncated input keeps the output produced so far. Only a stream that
/// yields nothing at all is an error.
pub fn decompress_segment(compressed: &[u8], offset: u64) -> Result<Vec<u8>, ArchiveError> {
    let mut decoded = Vec::with_capacity(compressed.len() * 4);
    let mut decoder = BzDecoder::new(compressed);
    match decoder.read_to_end(&mut decoded) {
        Ok(_) if decoded.is_empty() => Err(ArchiveError::EmptySegment { offset }),
        Ok(_) => Ok(decoded),
        Err(source) if decoded.is_empty() => Err(ArchiveError::Decompress { offset, source }),
        Err(err) => {
            debug!(offset, error = %err, kept = decoded.len(), "segment truncated, keeping partial output");
            Ok(decoded)
        }
    }
}
