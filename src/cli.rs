//! Command-line surface: argument parsing and the interactive shell.
//!
//! The shell reads one line at a time, parses it, runs it against the store,
//! and keeps going no matter how a query fails — only end-of-input, an
//! interrupt, or `EXIT` stops the loop.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::exec;
use crate::query;
use crate::store::ObjectListing;

/// Command line arguments for the gcsql shell
#[derive(Debug, clap::Parser)]
#[command(name = "gcsql", about = "A SQL-flavored shell for browsing object storage buckets")]
pub struct Args {
    /// JSON manifest of buckets and objects to serve
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Run a single query and exit instead of starting the shell
    #[arg(long)]
    pub query: Option<String>,

    /// Report malformed queries as errors instead of degrading silently
    #[arg(long)]
    pub strict: bool,
}

/// Parses one input line and runs it against the store, printing the result
/// table to stdout.
pub fn handle_input(store: &dyn ObjectListing, input: &str, strict: bool) -> Result<()> {
    let parser = if strict {
        query::Parser::strict(input)
    } else {
        query::Parser::new(input)
    };
    let parsed = parser.parse()?;

    let mut out = io::stdout().lock();
    exec::run_query(store, &parsed, &mut out)
}

/// Line-editing loop with per-session history.
pub fn repl(store: &dyn ObjectListing, strict: bool) -> Result<()> {
    let mut editor = DefaultEditor::new()?;

    println!("Welcome to gcsql. Type a query, or EXIT to quit.");
    loop {
        match editor.readline("gcsql> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line.eq_ignore_ascii_case("exit") {
                    println!("Goodbye!");
                    break;
                }
                editor.add_history_entry(line)?;

                // A bad query never kills the loop.
                if let Err(err) = handle_input(store, line, strict) {
                    eprintln!("Error: {err:#}");
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
