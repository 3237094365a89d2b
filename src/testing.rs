//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation. Callers
//! supply the directory fixtures are written into.
//! It builds small multistream dumps on disk so tests exercise the same
//! seek/decompress/extract path as a real dump.
//!
//! Helpers here panic on I/O failure; they only ever run inside tests.

#![doc(hidden)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use bzip2::Compression;
use quick_xml::escape::escape;

use crate::config::{Config, DUMP_FILE_NAME, INDEX_FILE_NAME};
use crate::types::{IndexEntry, PageId};

/// Compress `data` as one bzip2 stream.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data).expect("in-memory bzip2 write");
    encoder.finish().expect("in-memory bzip2 finish")
}

/// An index entry, as the parser would produce it.
pub fn entry(offset: u64, page_id: PageId, title: &str) -> IndexEntry {
    IndexEntry {
        offset,
        page_id,
        title: title.to_string(),
    }
}

/// One `<page>` element in dump layout. Title and text are escaped.
pub fn page_xml(page_id: PageId, title: &str, text: &str) -> String {
    format!(
        "  <page>\n    <title>{}</title>\n    <ns>0</ns>\n    <id>{}</id>\n    <revision>\n      \
         <id>{}</id>\n      <text bytes=\"{}\" xml:space=\"preserve\">{}</text>\n    </revision>\n  </page>\n",
        escape(title),
        page_id,
        page_id + 1_000_000,
        text.len(),
        escape(text),
    )
}

/// Builds a multistream dump and its index in memory.
#[derive(Debug, Default)]
pub struct DumpBuilder {
    dump: Vec<u8>,
    index: String,
}

impl DumpBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `<mediawiki>` and `<siteinfo>` as their own stream, like a
    /// real dump. Not indexed.
    pub fn push_header(&mut self) -> u64 {
        self.push_stream(
            b"<mediawiki xml:lang=\"en\">\n  <siteinfo>\n    <sitename>Wikipedia</sitename>\n  </siteinfo>\n",
        )
    }

    /// Append the closing `</mediawiki>` stream. Not indexed.
    pub fn push_footer(&mut self) -> u64 {
        self.push_stream(b"</mediawiki>\n")
    }

    /// Append raw bytes as one compressed stream. Returns its offset.
    pub fn push_stream(&mut self, xml: &[u8]) -> u64 {
        let offset = self.dump.len() as u64;
        self.dump.extend(compress(xml));
        offset
    }

    /// Append `(page_id, title, text)` pages as one stream and index them.
    pub fn push_pages(&mut self, pages: &[(PageId, &str, &str)]) -> u64 {
        let xml: String = pages
            .iter()
            .map(|(id, title, text)| page_xml(*id, title, text))
            .collect();
        let offset = self.push_stream(xml.as_bytes());
        for (id, title, _) in pages {
            self.push_index_line(&format!("{}:{}:{}", offset, id, title));
        }
        offset
    }

    /// Append a raw index line (need not point at a real page).
    pub fn push_index_line(&mut self, line: &str) {
        self.index.push_str(line);
        self.index.push('\n');
    }

    pub fn dump_bytes(&self) -> &[u8] {
        &self.dump
    }

    pub fn index_text(&self) -> &str {
        &self.index
    }

    /// Write the dump and a bzip2-compressed index into `dir`, under the
    /// conventional file names.
    ///
    /// The fixture owns `dir`; pass a `tempfile::TempDir` and the files go
    /// away with the fixture.
    pub fn write_into<D: AsRef<Path>>(self, dir: D) -> DumpFixture<D> {
        let root = dir.as_ref();
        fs::write(root.join(DUMP_FILE_NAME), &self.dump).expect("write dump");
        fs::write(root.join(INDEX_FILE_NAME), compress(self.index.as_bytes()))
            .expect("write index");
        DumpFixture { dir }
    }
}

/// A dump and index on disk, inside a directory the fixture owns.
#[derive(Debug)]
pub struct DumpFixture<D> {
    dir: D,
}

impl<D: AsRef<Path>> DumpFixture<D> {
    pub fn dir(&self) -> &Path {
        self.dir.as_ref()
    }

    pub fn dump_path(&self) -> PathBuf {
        self.dir().join(DUMP_FILE_NAME)
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir().join(INDEX_FILE_NAME)
    }

    /// Default configuration pointing at this fixture.
    pub fn config(&self) -> Config {
        Config::from_data_dir(self.dir())
    }
}
