//! Terminal status line for a scan in progress.

use crate::stats::ScanStats;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Single overwritten status line driven by the shared counters.
pub struct ProgressLine {
    bar: ProgressBar,
}

impl ProgressLine {
    /// Creates the spinner used during interactive scans.
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner} {msg}")
                .context("failed to set progress template")?,
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar })
    }

    /// Creates a reporter that renders nothing (tests, non-interactive use).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Rewrites the status line with the current counters.
    ///
    /// The counters may be concurrently incremented; the line is a
    /// best-effort view until the pool has drained, after which a final
    /// render reflects the consistent totals.
    pub fn render(&self, stats: &ScanStats, matches: u64) {
        self.bar.set_message(format!(
            "{} files - {} unreadable files - {} dirs - {} unreadable dirs - {} matches",
            stats.files(),
            stats.unreadable_files(),
            stats.dirs(),
            stats.unreadable_dirs(),
            matches,
        ));
    }

    /// Final render; leaves the last line on screen.
    pub fn finish(&self, stats: &ScanStats, matches: u64) {
        self.render(stats, matches);
        self.bar.finish();
    }
}
