//! Themes CLI - command-line front end for the themes library.
//!
//! Normalizes vendor theme payloads, builds and parses query keys, and runs
//! client-side matching over theme files. Output goes to stdout as JSON;
//! logs go to stderr.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use themes_core::{DefaultQuery, ThemeSource};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "themes-cli")]
#[command(about = "Normalize theme payloads and work with theme query keys")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// JSON file with the default query baseline (defaults to the standard one)
    #[arg(long, global = true)]
    defaults: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize a theme object or array of themes from a vendor payload
    Normalize {
        /// Payload source: jetpack, wpcom or wporg
        #[arg(short, long)]
        source: ThemeSource,
        /// JSON file holding the payload
        file: PathBuf,
    },
    /// Build the serialized key for a query
    Key {
        /// Query as a JSON object
        #[arg(short, long)]
        query: String,
        /// Site id to scope the key to
        #[arg(long)]
        site: Option<u64>,
        /// Leave the page option out of the key
        #[arg(long)]
        without_page: bool,
    },
    /// Recover the site id and query from a serialized key
    ParseKey {
        key: String,
    },
    /// Print the canonical themes in a file that match a query
    Filter {
        /// Query as a JSON object
        #[arg(short, long)]
        query: String,
        /// JSON file holding an array of canonical themes
        file: PathBuf,
    },
    /// Report the premium status of each canonical theme in a file
    Premium {
        /// JSON file holding an array of canonical themes
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let defaults = match &args.defaults {
        Some(path) => DefaultQuery::from_json_file(path)
            .with_context(|| format!("Failed to load default query from {}", path.display()))?,
        None => DefaultQuery::standard(),
    };
    debug!("Default query: {:?}", defaults);

    let output = match args.command {
        Command::Normalize { source, file } => commands::normalize(source, &file)?,
        Command::Key {
            query,
            site,
            without_page,
        } => commands::key(&query, site, without_page, &defaults)?,
        Command::ParseKey { key } => commands::parse_key(&key)?,
        Command::Filter { query, file } => commands::filter(&query, &file, &defaults)?,
        Command::Premium { file } => commands::premium(&file)?,
    };

    println!("{}", output);
    Ok(())
}
