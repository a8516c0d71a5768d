//! Append-only log sinks and match accounting shared by worker threads.

use crate::db::SourceIndex;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// A line-oriented append sink.
///
/// Concurrent writers are serialized per line: two lines may land in any
/// order but never interleave mid-line.
#[derive(Debug)]
pub struct LineSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl LineSink {
    /// Opens the sink in create-or-append mode. Failure here is fatal to the
    /// whole program, so it surfaces as an error.
    pub fn open_append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Appends one line. Write failures after open are reported to stderr
    /// and dropped; they never abort the scan.
    pub fn append_line(&self, line: &str) {
        let mut file = self.file.lock();
        if let Err(err) = writeln!(file, "{line}") {
            eprintln!("warning: failed to append to {}: {err}", self.path.display());
        }
    }
}

/// Per-source match tallies plus the grand total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchCounters {
    pub per_source: Vec<u64>,
    pub total: u64,
}

/// Records digest matches: one log line per match plus guarded counters.
///
/// The per-source counter and the total are bumped inside one lock region,
/// so concurrent workers cannot lose updates or skew the two against each
/// other.
#[derive(Debug)]
pub struct MatchRecorder {
    sink: LineSink,
    counters: Mutex<MatchCounters>,
}

impl MatchRecorder {
    /// Creates a recorder over `sink` with one counter per source list.
    pub fn new(sink: LineSink, sources: usize) -> Self {
        Self {
            sink,
            counters: Mutex::new(MatchCounters {
                per_source: vec![0; sources],
                total: 0,
            }),
        }
    }

    /// Appends `<digest> <source> <path>` and bumps the source's counter and
    /// the total as one unit.
    pub fn record(&self, digest: &str, source: &str, idx: SourceIndex, path: &Path) {
        self.sink
            .append_line(&format!("{digest} {source} {}", path.display()));
        let mut counters = self.counters.lock();
        counters.per_source[idx] += 1;
        counters.total += 1;
    }

    /// Current total, for the progress line. Eventually consistent while
    /// workers are still running.
    pub fn total(&self) -> u64 {
        self.counters.lock().total
    }

    /// Copy of all counters. Consistent once the pool has drained.
    pub fn snapshot(&self) -> MatchCounters {
        self.counters.lock().clone()
    }
}

/// Free-text failure log for unreadable paths and skipped files.
#[derive(Debug)]
pub struct ErrorSink {
    sink: LineSink,
}

impl ErrorSink {
    pub fn new(sink: LineSink) -> Self {
        Self { sink }
    }

    /// Appends one failure line.
    pub fn record(&self, message: &str) {
        self.sink.append_line(message);
    }
}
