//! CLI interface definitions for the `hscan` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes
//! [`Args`], the struct parsed from CLI inputs.
//!
//! The two path flags are deliberately optional at the parser level: `main`
//! treats a missing path as a usage short-circuit (help text, exit 0) rather
//! than a hard parse error, matching the tool's batch-friendly behavior.
//!
//! # Example
//!
//! ```bash
//! hscan --db /home/user/sha1lists/ --dir /mnt/image/
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `hscan` scanner.
#[derive(Parser, Debug)]
#[command(
    name = "hscan",
    version,
    about = "Look for files recursively matching reference lists of SHA-1 checksums",
    after_help = "Each database file must contain one checksum per line (hex, case-insensitive).\n\
                  Matches and errors are appended to hscan_match.log and hscan_error.log\n\
                  in the current working directory.\n\n\
                  EXAMPLE:\n  hscan --db /home/user/sha1lists/ --dir /mnt/image/"
)]
pub struct Args {
    /// Directory to scan recursively
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Directory containing text files with one checksum per line
    #[arg(short = 'b', long = "db", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Number of concurrent hashing workers (caps simultaneously open files)
    #[arg(long, value_name = "N", default_value_t = crate::scan::DEFAULT_WORKERS)]
    pub workers: usize,
}
