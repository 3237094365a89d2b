// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the wikidex command-line interface.
//!
//! Three subcommands: `search` and `article` index the dump and answer one
//! question, `shell` answers questions while the index is still loading.
//! Paths come from flags, then `WIKIDEX_*` environment variables, then the
//! conventional file names under `--data-dir`.

pub mod display;
pub mod shell;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use wikidex::{Config, SearchHit};

#[derive(Parser)]
#[command(
    name = "wikidex",
    about = "Offline title search and article lookup over multistream dumps",
    version
)]
pub struct Cli {
    /// Directory holding the dump and its index under their published names
    #[arg(long, env = "WIKIDEX_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    /// Index file (overrides --data-dir)
    #[arg(long, env = "WIKIDEX_INDEX", global = true)]
    pub index: Option<PathBuf>,

    /// Dump file (overrides --data-dir)
    #[arg(long, env = "WIKIDEX_DUMP", global = true)]
    pub dump: Option<PathBuf>,

    /// JSON file with tuning overrides (batch_size, cache_capacity, ...)
    #[arg(long, env = "WIKIDEX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index the dump, then search titles
    Search {
        /// Search query (at least two characters)
        query: String,

        /// Maximum number of results to return
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print `{"results": [[title, target], ...], "count": n}`
        #[arg(long)]
        json: bool,
    },

    /// Index until the title is known, then print the article
    Article {
        /// Exact, case-sensitive title
        title: String,

        /// Print the raw markup instead of rendered HTML
        #[arg(long)]
        raw: bool,

        /// Print the article as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive lookup while the index loads in the background
    Shell,
}

impl Cli {
    /// Resolve the runtime configuration. A JSON file replaces the
    /// `--data-dir` defaults; `--index` and `--dump` win over both.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<Config>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::from_data_dir(&self.data_dir),
        };

        if let Some(index) = &self.index {
            config.index_path = index.clone();
        }
        if let Some(dump) = &self.dump {
            config.dump_path = dump.clone();
        }
        Ok(config)
    }
}

/// JSON shape of a search response.
#[derive(Serialize)]
pub struct SearchResponse<'a> {
    pub results: &'a [SearchHit],
    pub count: usize,
}

impl<'a> SearchResponse<'a> {
    pub fn new(results: &'a [SearchHit]) -> Self {
        Self {
            results,
            count: results.len(),
        }
    }
}
