// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Turning raw article markup into something displayable.
//!
//! The fetcher doesn't care how this happens. It hands over the raw revision
//! text and gets back content plus category labels. Two converters ship:
//! [`WikitextConverter`] renders a best-effort HTML fragment, [`RawMarkup`]
//! leaves the text alone.

mod wikitext;

pub use wikitext::{extract_categories, WikitextConverter};

use crate::types::Article;

/// Output of a markup conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub content: String,
    pub categories: Vec<String>,
}

impl Rendered {
    pub fn into_article(self, title: impl Into<String>) -> Article {
        Article {
            title: title.into(),
            content: self.content,
            categories: self.categories,
        }
    }
}

/// Converts raw article markup for display.
pub trait MarkupConverter: Send + Sync {
    fn convert(&self, raw: &str) -> Rendered;
}

/// Pass-through converter. Categories are still collected.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawMarkup;

impl MarkupConverter for RawMarkup {
    fn convert(&self, raw: &str) -> Rendered {
        Rendered {
            content: raw.to_string(),
            categories: extract_categories(raw),
        }
    }
}
