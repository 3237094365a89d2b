use std::io::{self, Write};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{warn, Level};
use tracing_subscriber::EnvFilter;

use wikidex::{ArticleLookup, Config, IndexerHandle, Library, RawMarkup};

mod cli;
use cli::display::{self, IndexProgress};
use cli::{shell, Cli, Commands, SearchResponse};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", display::render_error(&format!("{err:#}")));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli.resolve_config()?;
    match cli.command {
        Commands::Search { query, limit, json } => run_search(config, &query, limit, json),
        Commands::Article { title, raw, json } => run_article(config, &title, raw, json),
        Commands::Shell => run_shell(config),
    }
}

fn open(config: Config) -> Result<Library> {
    Library::open(config).context("cannot open dump")
}

/// Drive the progress bar until `done` says stop or the indexer exits.
fn wait_for(library: &Library, handle: &IndexerHandle, mut done: impl FnMut() -> bool) {
    let progress = IndexProgress::new();
    while !handle.is_finished() && !done() {
        progress.update(&library.status());
        thread::sleep(POLL_INTERVAL);
    }
    progress.finish();
}

/// An unreadable index leaves whatever was merged; lookups still answer.
fn settle(handle: IndexerHandle) {
    if let Err(err) = handle.join() {
        warn!(error = %err, "indexing ended early");
    }
}

fn run_search(config: Config, query: &str, limit: Option<usize>, json: bool) -> Result<ExitCode> {
    let library = open(config)?;
    let handle = library.spawn_indexer()?;
    wait_for(&library, &handle, || false);
    settle(handle);

    let limit = limit.unwrap_or(library.config().max_results);
    let start = Instant::now();
    let hits = library.search_with_limit(query, limit);
    let elapsed = start.elapsed();

    let mut out = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut out, &SearchResponse::new(&hits))?;
        writeln!(out)?;
    } else {
        write!(out, "{}", display::render_hits(query, &hits, elapsed))?;
    }
    Ok(ExitCode::SUCCESS)
}

fn run_article(config: Config, title: &str, raw: bool, json: bool) -> Result<ExitCode> {
    let mut library = open(config)?;
    if raw {
        library = library.with_converter(RawMarkup);
    }

    let handle = library.spawn_indexer()?;
    wait_for(&library, &handle, || library.catalog().contains(title));
    handle.cancel();
    settle(handle);

    let mut out = io::stdout().lock();
    match library.article(title) {
        ArticleLookup::Found(article) => {
            if json {
                serde_json::to_writer(&mut out, article.as_ref())?;
                writeln!(out)?;
            } else {
                write!(out, "{}", display::render_article(&article))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        other => {
            let message = other.message().unwrap_or_default();
            eprintln!("{}", display::render_notice(&message));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_shell(config: Config) -> Result<ExitCode> {
    let library = open(config)?;
    let handle = library.spawn_indexer()?;

    let prompt = atty::is(atty::Stream::Stdin);
    let result = shell::run(&library, io::stdin().lock(), &mut io::stdout().lock(), prompt);

    handle.cancel();
    settle(handle);
    result.context("shell i/o")?;
    Ok(ExitCode::SUCCESS)
}
