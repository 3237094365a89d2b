// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Line-oriented lookup shell.
//!
//! A plain line is a search. Lines starting with `:` are commands:
//!
//! | Line               | Effect                          |
//! |--------------------|---------------------------------|
//! | `:article <title>` | print the article               |
//! | `:status`          | print indexing progress         |
//! | `:help`            | list commands                   |
//! | `:quit`            | leave (so does end of input)    |

use std::io::{self, BufRead, Write};
use std::time::Instant;

use wikidex::{ArticleLookup, Library};

use super::display;

const HELP: &str = "\
<query>            search titles
:article <title>   show an article
:status            indexing progress
:quit              exit";

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Empty,
    Search(&'a str),
    Article(&'a str),
    Status,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Line<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return if line.is_empty() {
            Line::Empty
        } else {
            Line::Search(line)
        };
    };
    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "article" | "a" if !rest.trim().is_empty() => Line::Article(rest.trim()),
        "status" | "s" => Line::Status,
        "help" | "h" | "?" => Line::Help,
        "quit" | "q" | "exit" => Line::Quit,
        _ => Line::Unknown(name),
    }
}

/// Read lines from `input` until `:quit` or end of input.
pub fn run<R, W>(library: &Library, input: R, out: &mut W, prompt: bool) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    if prompt {
        writeln!(out, "{}", display::render_status(&library.status()))?;
        writeln!(out, "Type :help for commands.")?;
    }
    let mut lines = input.lines();
    loop {
        if prompt {
            write!(out, "wikidex> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match parse(&line) {
            Line::Empty => {}
            Line::Quit => break,
            Line::Help => writeln!(out, "{HELP}")?,
            Line::Status => writeln!(out, "{}", display::render_status(&library.status()))?,
            Line::Search(query) => {
                let start = Instant::now();
                let hits = library.search(query);
                write!(out, "{}", display::render_hits(query, &hits, start.elapsed()))?;
            }
            Line::Article(title) => match library.article(title) {
                ArticleLookup::Found(article) => {
                    write!(out, "{}", display::render_article(&article))?
                }
                other => {
                    let message = other.message().unwrap_or_default();
                    writeln!(out, "{}", display::render_notice(&message))?
                }
            },
            Line::Unknown(name) => writeln!(
                out,
                "{}",
                display::render_error(&format!("unknown command :{name} (try :help)"))
            )?,
        }
    }
    Ok(())
}
