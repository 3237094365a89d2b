// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Streaming reader for the `offset:page_id:title` index.
//!
//! The published index is itself a multistream bzip2 file, but a decompressed
//! copy works just as well. We sniff the `BZh` magic and pick the right reader,
//! so callers never have to care.
//!
//! Lines are decoded lossily. One bad byte in a title is not a reason to lose
//! the other twenty million.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bzip2::bufread::MultiBzDecoder;
use tracing::trace;

use crate::types::IndexEntry;

/// Magic bytes at the start of every bzip2 stream.
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Read buffer for the index stream.
const READ_BUFFER: usize = 256 * 1024;

/// Where the index lines come from.
///
/// The indexer reads the source twice (once to count, once to parse), so a
/// source must be re-openable.
#[derive(Debug, Clone)]
pub enum IndexSource {
    File(PathBuf),
    Memory(Arc<[u8]>),
}

impl IndexSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        IndexSource::File(path.into())
    }

    pub fn memory(bytes: impl Into<Arc<[u8]>>) -> Self {
        IndexSource::Memory(bytes.into())
    }

    /// Open a fresh line stream from the start of the source.
    pub fn open(&self) -> io::Result<IndexLines> {
        match self {
            IndexSource::File(path) => open_file(path),
            IndexSource::Memory(bytes) => {
                IndexLines::from_buffered(BufReader::new(Cursor::new(Arc::clone(bytes))))
            }
        }
    }
}

fn open_file(path: &Path) -> io::Result<IndexLines> {
    let file = File::open(path)?;
    IndexLines::from_buffered(BufReader::with_capacity(READ_BUFFER, file))
}

/// Iterator over the raw lines of an index stream.
pub struct IndexLines {
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
}

impl IndexLines {
    fn from_buffered<R>(mut reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let compressed = reader.fill_buf()?.starts_with(BZIP2_MAGIC);
        let reader: Box<dyn BufRead + Send> = if compressed {
            Box::new(BufReader::with_capacity(
                READ_BUFFER,
                MultiBzDecoder::new(reader),
            ))
        } else {
            Box::new(reader)
        };
        Ok(Self {
            reader,
            buf: Vec::with_capacity(256),
        })
    }

    /// Wrap an arbitrary reader (compressed or not).
    pub fn from_reader<R>(reader: R) -> io::Result<Self>
    where
        R: Read + Send + 'static,
    {
        Self::from_buffered(BufReader::new(reader))
    }

    /// Parsed entries. Malformed lines are dropped with a trace event.
    pub fn entries(self) -> impl Iterator<Item = io::Result<IndexEntry>> {
        self.filter_map(|line| match line {
            Ok(line) => {
                let entry = parse_line(&line);
                if entry.is_none() && !line.trim().is_empty() {
                    trace!(line = %line, "skipping malformed index line");
                }
                entry.map(Ok)
            }
            Err(err) => Some(Err(err)),
        })
    }
}

impl Iterator for IndexLines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                    self.buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(err) => Some(Err(err)),
        }
    }
}

/// Parse one index line.
///
/// Only the first two colons separate fields, so `12:34:Help:Contents` has
/// title `Help:Contents`. Returns `None` when a field is missing, the offset
/// or page id is not an unsigned integer, or the title is empty.
pub fn parse_line(line: &str) -> Option<IndexEntry> {
    let mut fields = line.trim().splitn(3, ':');
    let offset = fields.next()?.parse::<u64>().ok()?;
    let page_id = fields.next()?.parse::<u64>().ok()?;
    let title = fields.next()?;
    if title.is_empty() {
        return None;
    }
    Some(IndexEntry {
        offset,
        page_id,
        title: title.to_string(),
    })
}

/// Count the non-blank lines of a source (the indexer's first pass).
pub fn count_records(source: &IndexSource) -> io::Result<u64> {
    let mut total = 0;
    for line in source.open()? {
        if !line?.trim().is_empty() {
            total += 1;
        }
    }
    Ok(total)
}
