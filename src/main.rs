//! dirstat — directory statistics from the command line.
//!
//! Thin binary entry point. All logic lives in the `dirstat-core` and
//! `dirstat-report` crates.

use clap::Parser;
use std::path::PathBuf;

/// Scan a directory tree and print aggregate statistics: totals, a
/// per-extension breakdown, the file-size distribution, and top-N lists
/// of the largest files and folders.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to analyse
    path: PathBuf,

    /// Number of entries in each "top N" list
    #[arg(short = 't', long, default_value_t = 10)]
    top: usize,

    /// Size-range numbers (1-10) whose individual files are listed
    #[arg(short = 'r', long, value_delimiter = ',')]
    ranges: Vec<usize>,

    /// Write a JSON summary of the report to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the top-files table as CSV to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialise structured logging on stderr so the report itself owns
    // stdout.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    dirstat_report::run(dirstat_report::RunOptions {
        path: cli.path,
        top: cli.top,
        verbose_ranges: cli.ranges,
        json: cli.json,
        csv: cli.csv,
    })
}
