//! Concurrent scan pipeline for `hscan`.
//!
//! This module handles:
//! - Recursive directory traversal using `WalkDir` (symlinks never followed)
//! - Eligibility filtering (regular, non-empty, at or under the size cap)
//! - Submission of hash-and-match tasks to the bounded [`WorkerPool`]
//! - Absorbing per-entry failures into the [`ErrorSink`] so a single
//!   unreadable subtree never aborts the walk
//!
//! The main entry point is [`scan_tree`], which blocks until every submitted
//! task has completed. Afterwards the context's counters are a consistent
//! snapshot: nothing mutates them once the pool has drained.

use crate::db::HashDatabase;
use crate::hash::{digest_hex, hash_file};
use crate::pool::WorkerPool;
use crate::progress::ProgressLine;
use crate::sink::{ErrorSink, MatchRecorder};
use crate::stats::ScanStats;
use anyhow::Result;
use humansize::{DECIMAL, format_size};
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

/// Files larger than this are logged as skipped instead of hashed.
pub const MAX_FILE_SIZE: u64 = 250_000_000;

/// Default number of concurrent hashing workers.
pub const DEFAULT_WORKERS: usize = 5;

/// Tuning knobs for a scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Concurrent hashing workers; also the cap on simultaneously open files.
    pub workers: usize,
    /// Size above which files are skipped rather than hashed.
    pub max_file_size: u64,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

/// Everything a scan task needs, shared by `Arc` across the traversal
/// thread and the workers.
pub struct ScanContext {
    pub db: HashDatabase,
    pub stats: ScanStats,
    pub matches: MatchRecorder,
    pub errors: ErrorSink,
    pub progress: ProgressLine,
}

/// Walks `root` and hash-matches every eligible file against the database.
///
/// Traversal errors, unreadable files and oversize files are logged and
/// counted but never abort the walk. Returns once the worker pool has
/// drained, i.e. every submitted task ran to completion.
pub fn scan_tree(root: &Path, ctx: &Arc<ScanContext>, opts: &ScanOptions) -> Result<()> {
    let pool = WorkerPool::new(opts.workers)?;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                ctx.errors.record(&format!("could not read {path}: {err}"));
                ctx.stats.add_unreadable_dir();
                continue;
            }
        };

        if entry.file_type().is_dir() {
            ctx.stats.add_dir();
            continue;
        }
        // symlinks, sockets, device nodes
        if !entry.file_type().is_file() {
            continue;
        }

        let size = match entry.metadata() {
            Ok(meta) => meta.len(),
            Err(err) => {
                ctx.errors
                    .record(&format!("could not stat {}: {err}", entry.path().display()));
                ctx.stats.add_unreadable_file();
                continue;
            }
        };
        // zero-size files are skipped silently (i.e. /dev, /proc entries)
        if size == 0 {
            continue;
        }

        ctx.stats.add_file();
        if size > opts.max_file_size {
            ctx.errors.record(&format!(
                "skip file size > {}: {}",
                format_size(opts.max_file_size, DECIMAL),
                entry.path().display()
            ));
            ctx.stats.add_oversize_skip();
            continue;
        }

        let task_ctx = Arc::clone(ctx);
        let path = entry.into_path();
        pool.submit(move || hash_and_match(&path, &task_ctx));
        ctx.progress.render(&ctx.stats, ctx.matches.total());
    }

    pool.drain();
    Ok(())
}

/// Body of one scheduled task: digest the file and match it against the
/// database, recording a hit or absorbing a read failure.
fn hash_and_match(path: &Path, ctx: &ScanContext) {
    match hash_file(path) {
        Ok(digest) => {
            let digest = digest_hex(&digest);
            if let Some(idx) = ctx.db.lookup(&digest) {
                ctx.matches
                    .record(&digest, ctx.db.source_name(idx), idx, path);
            }
        }
        Err(err) => {
            ctx.errors
                .record(&format!("could not hash {}: {err:#}", path.display()));
            ctx.stats.add_unreadable_file();
        }
    }
    ctx.progress.render(&ctx.stats, ctx.matches.total());
}
