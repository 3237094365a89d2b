// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Locating one page inside a decompressed segment.
//!
//! A segment is not a well-formed XML document. The first one opens
//! `<mediawiki>` and `<siteinfo>`, the last one closes `</mediawiki>`, and
//! a guessed read window can stop in the middle of a tag. So extraction is a
//! chain of strategies, most precise first:
//!
//! 1. [`XmlPageExtractor`] walks quick-xml events, tracking where it is inside
//!    each `<page>`. It stops at the first parse error.
//! 2. [`PatternPageExtractor`] falls back to regexes over the raw tags, which
//!    shrug off anything the parser chokes on.
//!
//! A page matches when its `<title>` equals the wanted title or its own
//! `<id>` (not the revision id) equals the wanted page id, and its revision
//! text is non-blank.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::trace;

use crate::types::PageId;

/// The page being looked for.
#[derive(Debug, Clone, Copy)]
pub struct PageTarget<'a> {
    pub title: &'a str,
    pub page_id: PageId,
}

impl<'a> PageTarget<'a> {
    pub fn new(title: &'a str, page_id: PageId) -> Self {
        Self { title, page_id }
    }

    fn matches(&self, title: Option<&str>, id: Option<&str>) -> bool {
        title == Some(self.title)
            || id.and_then(|id| id.trim().parse::<PageId>().ok()) == Some(self.page_id)
    }
}

/// One way of pulling raw article markup out of a segment.
pub trait PageExtractor: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// The unescaped revision text of the target page, if found.
    fn extract(&self, xml: &str, target: &PageTarget<'_>) -> Option<String>;
}

// =============================================================================
// STRUCTURED
// =============================================================================

/// Event-driven XML walk.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlPageExtractor;

/// Fields collected for the page currently being read.
#[derive(Default)]
struct PageFields {
    title: Option<String>,
    id: Option<String>,
    text: Option<String>,
}

impl PageFields {
    fn record(&mut self, path: &[Vec<u8>], value: &str) {
        let slot = match path {
            [page, title] if page == b"page" && title == b"title" => &mut self.title,
            [page, id] if page == b"page" && id == b"id" => &mut self.id,
            [page, revision, text] if page == b"page" && revision == b"revision" && text == b"text" => {
                &mut self.text
            }
            _ => return,
        };
        slot.get_or_insert_with(String::new).push_str(value);
    }

    fn into_text_if(self, target: &PageTarget<'_>) -> Option<String> {
        if !target.matches(self.title.as_deref(), self.id.as_deref()) {
            return None;
        }
        self.text.filter(|text| !text.trim().is_empty())
    }
}

impl PageExtractor for XmlPageExtractor {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn extract(&self, xml: &str, target: &PageTarget<'_>) -> Option<String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = false;

        // Element path relative to the enclosing <page>.
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut page: Option<PageFields> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let name = start.name().as_ref().to_vec();
                    if name == b"page" {
                        page = Some(PageFields::default());
                        path.clear();
                    }
                    path.push(name);
                }
                Ok(Event::End(end)) => {
                    if end.name().as_ref() == b"page" {
                        if let Some(text) = page.take().and_then(|p| p.into_text_if(target)) {
                            return Some(text);
                        }
                        path.clear();
                    } else {
                        path.pop();
                    }
                }
                Ok(Event::Text(text)) => {
                    if let Some(fields) = page.as_mut() {
                        match text.unescape() {
                            Ok(value) => fields.record(&path, &value),
                            Err(err) => {
                                trace!(error = %err, "bad entity in segment text");
                                return None;
                            }
                        }
                    }
                }
                Ok(Event::Eof) => return None,
                Err(err) => {
                    trace!(error = %err, position = reader.buffer_position(), "xml walk stopped");
                    return None;
                }
                Ok(_) => {}
            }
        }
    }
}

// =============================================================================
// PATTERN FALLBACK
// =============================================================================

static PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<page>(.*?)</page>").expect("static regex"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>(.*?)</title>").expect("static regex"));
static ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<id>(\d+)</id>").expect("static regex"));
static TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text[^>]*>(.*?)</text>").expect("static regex"));

/// Regex scan over complete `<page>…</page>` blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternPageExtractor;

impl PageExtractor for PatternPageExtractor {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn extract(&self, xml: &str, target: &PageTarget<'_>) -> Option<String> {
        for block in PAGE_RE.captures_iter(xml) {
            let body = &block[1];
            let Some(title) = TITLE_RE.captures(body) else {
                continue;
            };
            let title = unescape_lossy(&title[1]);
            // The first <id> in a page block is the page id; revision ids come later.
            let id = ID_RE.captures(body).map(|id| id[1].to_string());
            if !target.matches(Some(title.as_ref()), id.as_deref()) {
                continue;
            }
            if let Some(text) = TEXT_RE.captures(body) {
                if !text[1].trim().is_empty() {
                    return Some(unescape_lossy(&text[1]).into_owned());
                }
            }
        }
        None
    }
}

fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

// =============================================================================
// CHAIN
// =============================================================================

/// Ordered list of extractors, tried until one finds the page.
pub struct ExtractorChain {
    extractors: Vec<Box<dyn PageExtractor>>,
}

impl Default for ExtractorChain {
    fn default() -> Self {
        Self::new(vec![
            Box::new(XmlPageExtractor),
            Box::new(PatternPageExtractor),
        ])
    }
}

impl ExtractorChain {
    pub fn new(extractors: Vec<Box<dyn PageExtractor>>) -> Self {
        Self { extractors }
    }

    pub fn extract(&self, xml: &str, target: &PageTarget<'_>) -> Option<String> {
        self.extractors.iter().find_map(|extractor| {
            let found = extractor.extract(xml, target);
            trace!(
                strategy = extractor.name(),
                found = found.is_some(),
                title = target.title,
                "page extraction"
            );
            found
        })
    }
}
