// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Best-effort wikitext → HTML.
//!
//! This is a pile of regex passes, not a parser. It strips what can't be shown
//! offline (templates, references, files, tables), renders the common inline
//! syntax, and groups what's left into paragraphs. Anything it doesn't
//! recognize passes through as text.
//!
//! Pass order matters: categories come out before links are rendered, and
//! templates are gone before headings and lists see the text.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{MarkupConverter, Rendered};

/// Passes of nested-template removal. Deeper nesting is left as text.
const TEMPLATE_PASSES: usize = 5;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static regex")
}

static CATEGORY: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\[\[Category:([^\]|]+)(?:\|[^\]]*)?\]\]"));
static CATEGORY_LINK: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)\[\[Category:[^\]]*\]\]"));
static FILE_LINK: LazyLock<Regex> =
    LazyLock::new(|| re(r"(?i)\[\[(?:File|Image):(?:[^\[\]]|\[\[[^\]]*\]\])*\]\]"));
static GALLERY: LazyLock<Regex> = LazyLock::new(|| re(r"(?is)<gallery[^>]*>.*?</gallery>"));

static FLAT_TEMPLATE: LazyLock<Regex> = LazyLock::new(|| re(r"\{\{[^{}]*\}\}"));
static NESTED_TEMPLATE: LazyLock<Regex> =
    LazyLock::new(|| re(r"\{\{[^{}]*(?:\{\{[^{}]*\}\}[^{}]*)*\}\}"));

static REF_BLOCK: LazyLock<Regex> = LazyLock::new(|| re(r"(?is)<ref[^>]*>.*?</ref>"));
static REF_TAG: LazyLock<Regex> = LazyLock::new(|| re(r"(?i)<ref[^>]*/?>"));
static COMMENT: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)<!--.*?-->"));

static TABLE: LazyLock<Regex> = LazyLock::new(|| re(r"(?s)\{\|[^}]*\|\}"));
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\|-.*$"));
static TABLE_HEADER: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^![^|]*\|"));
static TABLE_CELL: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\|[^|]*\|"));

/// Deepest first, so `====x====` is not read as `==` around `==x==`.
static HEADINGS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (re(r"(?m)^======([^=]+)======"), "<h6>${1}</h6>"),
        (re(r"(?m)^=====([^=]+)====="), "<h5>${1}</h5>"),
        (re(r"(?m)^====([^=]+)===="), "<h4>${1}</h4>"),
        (re(r"(?m)^===([^=]+)==="), "<h3>${1}</h3>"),
        (re(r"(?m)^==([^=]+)=="), "<h2>${1}</h2>"),
    ]
});

static BOLD: LazyLock<Regex> = LazyLock::new(|| re(r"'''([^']+)'''"));
static ITALIC: LazyLock<Regex> = LazyLock::new(|| re(r"''([^']+)''"));

static PIPED_LINK: LazyLock<Regex> = LazyLock::new(|| re(r"\[\[([^|\]]+)\|([^\]]+)\]\]"));
static PLAIN_LINK: LazyLock<Regex> = LazyLock::new(|| re(r"\[\[([^\]]+)\]\]"));
static LABELED_URL: LazyLock<Regex> = LazyLock::new(|| re(r"\[([^ ]+) ([^\]]+)\]"));
static BARE_URL: LazyLock<Regex> = LazyLock::new(|| re(r"\[([^ \]]+)\]"));

static BULLET: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\*+ (.+)$"));
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^#+ (.+)$"));

static EXTRA_BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| re(r"\n\s*\n\s*\n"));
static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| re(r"(?m)^\s+$"));
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| re(r"\s+"));

/// Category labels in order of appearance.
pub fn extract_categories(raw: &str) -> Vec<String> {
    CATEGORY
        .captures_iter(raw)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Renders wikitext into an HTML fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct WikitextConverter;

impl MarkupConverter for WikitextConverter {
    fn convert(&self, raw: &str) -> Rendered {
        let categories = extract_categories(raw);

        let mut text = strip(raw);
        text = render_inline(&text);
        text = EXTRA_BLANK_LINES.replace_all(&text, "\n\n").into_owned();
        text = BLANK_LINE.replace_all(&text, "").into_owned();

        Rendered {
            content: paragraphs(&text),
            categories,
        }
    }
}

/// Remove everything that has no offline rendering.
fn strip(raw: &str) -> String {
    let mut text = CATEGORY_LINK.replace_all(raw, "").into_owned();
    for pattern in [&*FILE_LINK, &*GALLERY] {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text = strip_templates(&text);
    for pattern in [
        &*REF_BLOCK,
        &*REF_TAG,
        &*COMMENT,
        &*TABLE,
        &*TABLE_ROW,
        &*TABLE_HEADER,
        &*TABLE_CELL,
    ] {
        text = pattern.replace_all(&text, "").into_owned();
    }
    text
}

fn strip_templates(text: &str) -> String {
    let mut text = FLAT_TEMPLATE.replace_all(text, "").into_owned();
    for _ in 0..TEMPLATE_PASSES {
        let next = NESTED_TEMPLATE.replace_all(&text, "");
        if next == text {
            break;
        }
        text = next.into_owned();
    }
    text
}

fn render_inline(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in HEADINGS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text = BOLD.replace_all(&text, "<strong>${1}</strong>").into_owned();
    text = ITALIC.replace_all(&text, "<em>${1}</em>").into_owned();

    text = PIPED_LINK
        .replace_all(&text, |caps: &Captures| wiki_link(&caps[1], &caps[2]))
        .into_owned();
    text = PLAIN_LINK
        .replace_all(&text, |caps: &Captures| wiki_link(&caps[1], &caps[1]))
        .into_owned();
    text = LABELED_URL
        .replace_all(&text, r#"<a href="${1}" target="_blank">${2}</a>"#)
        .into_owned();
    text = BARE_URL
        .replace_all(&text, r#"<a href="${1}" target="_blank">${1}</a>"#)
        .into_owned();

    text = BULLET.replace_all(&text, "<li>${1}</li>").into_owned();
    NUMBERED.replace_all(&text, "<li>${1}</li>").into_owned()
}

/// Internal link. Article titles start with a capital, links often don't.
fn wiki_link(target: &str, label: &str) -> String {
    format!(r#"<a href="/wiki/{}">{}</a>"#, capitalize_first(target), label)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => first.to_uppercase().chain(chars).collect(),
        _ => text.to_string(),
    }
}

/// Group blank-line separated blocks into paragraphs, headings, and lists.
fn paragraphs(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_list = false;

    for block in text.split("\n\n").map(str::trim).filter(|b| !b.is_empty()) {
        let is_item = block.starts_with("<li>");
        if is_item || block.starts_with("<h") {
            if is_item && !in_list {
                out.push("<ul>".into());
                in_list = true;
            } else if !is_item && in_list {
                out.push("</ul>".into());
                in_list = false;
            }
            out.push(block.to_string());
            continue;
        }

        if in_list {
            out.push("</ul>".into());
            in_list = false;
        }
        let flowed = WHITESPACE_RUN.replace_all(block, " ");
        let flowed = flowed.trim();
        if !flowed.is_empty() {
            out.push(format!("<p>{flowed}</p>"));
        }
    }

    if in_list {
        out.push("</ul>".into());
    }
    out.join("\n")
}
