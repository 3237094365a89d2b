// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the wikidex CLI.
//!
//! OneDark for dark terminals, One Light for light ones. Detection tries
//! `WIKIDEX_THEME` first, then `COLORFGBG`, then defaults to dark. Respects
//! `NO_COLOR` and drops all escapes when stdout is not a TTY, so piping
//! `wikidex search` into another tool gives clean lines.
//!
//! Everything here returns `String`s; the caller decides where they go.

use std::sync::OnceLock;
use std::time::Duration;

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use wikidex::{group_thousands, Article, IndexingStatus, SearchHit, Tier};

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("WIKIDEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where a background of 7 or above (except 8) is light.
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Colors only on a TTY, and never with `NO_COLOR` set.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply a theme color with optional modifiers, or nothing off-TTY.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Length without ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded tier label, `T0` through `T4`.
pub fn tier_label(tier: Tier) -> String {
    let label = format!("T{}", tier.as_u8());
    let color: fn() -> String = match tier {
        Tier::Exact => GREEN,
        Tier::Prefix => CYAN,
        Tier::Substring => BLUE,
        Tier::Word => MAGENTA,
        Tier::Fragment => GRAY,
    };
    themed(color, &[BOLD], &label)
}

/// Elapsed time, green under 5 ms, yellow under 50 ms, red above.
pub fn timing_ms(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    let text = format!("{:.2} ms", ms);
    let color: fn() -> String = if ms < 5.0 {
        GREEN
    } else if ms < 50.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

/// Result list for one query.
pub fn render_hits(query: &str, hits: &[SearchHit], elapsed: Duration) -> String {
    let mut out = format!(
        "{} for {} {}\n",
        themed(CYAN, &[BOLD], &format!("{} results", hits.len())),
        themed(YELLOW, &[], &format!("{query:?}")),
        themed(GRAY, &[DIM], &format!("({})", timing_ms(elapsed))),
    );
    for hit in hits {
        out.push_str(&format!("  {} {}\n", pad_right(&tier_label(hit.tier), 3), hit.title));
    }
    out
}

/// Title, body, then categories.
pub fn render_article(article: &Article) -> String {
    let mut out = format!("{}\n\n{}\n", themed(CYAN, &[BOLD], &article.title), article.content);
    if !article.categories.is_empty() {
        out.push_str(&format!(
            "\n{} {}\n",
            themed(GRAY, &[], "Categories:"),
            article.categories.join(", ")
        ));
    }
    out
}

pub fn render_notice(message: &str) -> String {
    themed(YELLOW, &[], message)
}

pub fn render_error(message: &str) -> String {
    themed(RED, &[BOLD], message)
}

/// One-line progress summary.
pub fn render_status(status: &IndexingStatus) -> String {
    if status.is_unavailable() {
        return render_error(&format!(
            "index unavailable ({} titles loaded before failure)",
            group_thousands(status.indexed)
        ));
    }
    if status.complete {
        return themed(
            GREEN,
            &[],
            &format!("index complete: {} titles", group_thousands(status.indexed)),
        );
    }
    format!(
        "indexing {} of {} ({:.1}%){}",
        group_thousands(status.indexed),
        group_thousands(status.total.max(0) as u64),
        status.percent(),
        if status.current.is_empty() {
            String::new()
        } else {
            format!(" {}", themed(GRAY, &[DIM], &format!("at {}", status.current)))
        }
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// PROGRESS
// ═══════════════════════════════════════════════════════════════════════════

/// Progress bar fed from status snapshots. A no-op without the `parallel`
/// feature or off-TTY.
pub struct IndexProgress {
    #[cfg(feature = "parallel")]
    bar: ProgressBar,
}

impl IndexProgress {
    #[cfg(feature = "parallel")]
    pub fn new() -> Self {
        let bar = if use_colors() {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {human_pos}/{human_len} {wide_msg}",
        )
        .map(|style| style.progress_chars("━━╸"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style);
        bar.set_prefix("Indexing");
        Self { bar }
    }

    #[cfg(not(feature = "parallel"))]
    pub fn new() -> Self {
        Self {}
    }

    #[cfg(feature = "parallel")]
    pub fn update(&self, status: &IndexingStatus) {
        if status.total > 0 {
            self.bar.set_length(status.total as u64);
        }
        self.bar.set_position(status.indexed);
        self.bar.set_message(status.current.clone());
    }

    #[cfg(not(feature = "parallel"))]
    pub fn update(&self, _status: &IndexingStatus) {}

    #[cfg(feature = "parallel")]
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    #[cfg(not(feature = "parallel"))]
    pub fn finish(&self) {}
}

impl Default for IndexProgress {
    fn default() -> Self {
        Self::new()
    }
}
