//! Shared counters for a scan in progress.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters mutated concurrently by the traversal loop and worker threads.
///
/// Each counter is independent, so relaxed atomic increments are enough.
/// Readers that need a consistent view take a [`ScanStats::snapshot`] after
/// the worker pool has drained; until then, reads are eventually consistent
/// (good enough for the progress line).
#[derive(Debug, Default)]
pub struct ScanStats {
    files: AtomicU64,
    dirs: AtomicU64,
    unreadable_files: AtomicU64,
    unreadable_dirs: AtomicU64,
    oversize_skips: AtomicU64,
}

impl ScanStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a regular, non-symlink, non-empty file (including ones later
    /// skipped for size).
    pub fn add_file(&self) {
        self.files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_dir(&self) {
        self.dirs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_unreadable_file(&self) {
        self.unreadable_files.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_unreadable_dir(&self) {
        self.unreadable_dirs.fetch_add(1, Ordering::Relaxed);
    }

    /// Oversize skips are a distinct failure class, not unreadable files.
    pub fn add_oversize_skip(&self) {
        self.oversize_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn files(&self) -> u64 {
        self.files.load(Ordering::Relaxed)
    }

    pub fn dirs(&self) -> u64 {
        self.dirs.load(Ordering::Relaxed)
    }

    pub fn unreadable_files(&self) -> u64 {
        self.unreadable_files.load(Ordering::Relaxed)
    }

    pub fn unreadable_dirs(&self) -> u64 {
        self.unreadable_dirs.load(Ordering::Relaxed)
    }

    pub fn oversize_skips(&self) -> u64 {
        self.oversize_skips.load(Ordering::Relaxed)
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            files: self.files(),
            dirs: self.dirs(),
            unreadable_files: self.unreadable_files(),
            unreadable_dirs: self.unreadable_dirs(),
            oversize_skips: self.oversize_skips(),
        }
    }
}

/// Copied counter values, safe to read field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub files: u64,
    pub dirs: u64,
    pub unreadable_files: u64,
    pub unreadable_dirs: u64,
    pub oversize_skips: u64,
}
