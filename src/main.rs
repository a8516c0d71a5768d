//! Main entry point for the `hscan` CLI application.
//!
//! `hscan` scans a directory tree and flags files whose content digest
//! appears in one or more reference hash databases (one hex digest per
//! line, e.g. forensic known-file sets). Matches and per-entry failures are
//! appended to log files in the working directory.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Treats missing/invalid user input as a usage short-circuit (exit 0)
//! - Opens the match and error sinks, loads the databases
//! - Delegates traversal and matching to [`hscan::scan::scan_tree`]
//! - Prints the per-source summary and elapsed time after the pool drains
//!
//! # Exit behavior
//! - 0 on normal completion and on usage/validation short-circuits
//! - Non-zero only for fatal setup failures (database directory unreadable,
//!   log files cannot be opened); per-entry scan errors are logged, never
//!   fatal

use anyhow::Result;
use clap::{CommandFactory, Parser};
use hscan::cli::Args;
use hscan::db::HashDatabase;
use hscan::progress::ProgressLine;
use hscan::scan::{ScanContext, ScanOptions, scan_tree};
use hscan::sink::{ErrorSink, LineSink, MatchRecorder};
use hscan::stats::ScanStats;
use indicatif::HumanDuration;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Match log appended in the working directory.
const MATCH_LOG: &str = "hscan_match.log";

/// Error log appended in the working directory.
const ERROR_LOG: &str = "hscan_error.log";

fn main() -> Result<()> {
    let args = Args::parse();

    // User-input problems print usage and exit cleanly rather than failing.
    let (Some(root), Some(db_dir)) = (&args.dir, &args.db) else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };
    if !db_dir.is_dir() {
        println!(
            "ERROR loading databases: \"{}\" does not exist or is not a directory",
            db_dir.display()
        );
        return Ok(());
    }

    let match_sink = LineSink::open_append(Path::new(MATCH_LOG))?;
    let error_sink = LineSink::open_append(Path::new(ERROR_LOG))?;

    let db = HashDatabase::load(db_dir)?;
    if db.is_empty() {
        println!("No database text file found in \"{}\"", db_dir.display());
        return Ok(());
    }

    let sources = db.sources().len();
    let ctx = Arc::new(ScanContext {
        matches: MatchRecorder::new(match_sink, sources),
        errors: ErrorSink::new(error_sink),
        stats: ScanStats::new(),
        progress: ProgressLine::new()?,
        db,
    });
    let opts = ScanOptions {
        workers: args.workers,
        ..ScanOptions::default()
    };

    println!();
    println!("Scanning path \"{}\"...", root.display());
    let start = Instant::now();
    scan_tree(root, &ctx, &opts)?;
    ctx.progress.finish(&ctx.stats, ctx.matches.total());

    let counters = ctx.matches.snapshot();
    println!();
    println!("RESULT");
    for (name, count) in ctx.db.sources().iter().zip(&counters.per_source) {
        println!("  {name:<40} : {count} matches");
    }
    println!("  {:<40} : {} matches", "Total", counters.total);
    println!();
    println!("Done in {}", HumanDuration(start.elapsed()));

    Ok(())
}
