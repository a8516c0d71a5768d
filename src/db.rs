//! Reference hash databases loaded from a directory of digest lists.
//!
//! This module handles:
//! - Enumerating a flat (non-recursive) database directory
//! - Skipping subdirectories and non-text files via the [`crate::sniff`] probe
//! - Normalizing each line to a canonical lowercase 40-hex-character key
//! - Building one map from digest to owning source list
//!
//! The database is built once before the scan starts and never mutated
//! afterwards, so worker threads query it concurrently with no
//! synchronization. If the same digest appears in several lists, the
//! last-loaded list keeps it.

use crate::hash::DIGEST_HEX_LEN;
use crate::sniff;
use anyhow::{Context, Result};
use fnv::FnvHashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Identifies which loaded digest list an entry came from.
pub type SourceIndex = usize;

/// In-memory set of known digests, each tagged with its source list.
#[derive(Debug, Default)]
pub struct HashDatabase {
    digests: FnvHashMap<String, SourceIndex>,
    sources: Vec<String>,
}

impl HashDatabase {
    /// Loads every plain-text digest list found directly under `dir`.
    ///
    /// Subdirectories and non-text files are skipped without error. Fails if
    /// the directory cannot be listed or a candidate file cannot be read.
    /// Zero usable files is not an error here; callers check
    /// [`HashDatabase::is_empty`] and short-circuit.
    pub fn load(dir: &Path) -> Result<Self> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("failed to access database directory {}", dir.display()))?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.with_context(|| {
                format!("failed to list database directory {}", dir.display())
            })?;
            paths.push(entry.path());
        }
        // Source indices follow file-name order, so repeated loads assign
        // them (and resolve duplicate digests) deterministically.
        paths.sort();

        let mut db = Self::default();
        for path in paths {
            if path.is_dir() {
                continue;
            }
            if !sniff::is_plain_text(&path)? {
                continue;
            }
            let idx = db.sources.len();
            db.load_list(&path, idx)?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            db.sources.push(name);
        }
        Ok(db)
    }

    fn load_list(&mut self, path: &Path, idx: SourceIndex) -> Result<()> {
        let start = Instant::now();
        let file = File::open(path)
            .with_context(|| format!("failed to open database file {}", path.display()))?;

        let mut lines = 0u64;
        for line in BufReader::new(file).lines() {
            let line = line
                .with_context(|| format!("failed to read database file {}", path.display()))?;
            if let Some(digest) = normalize_digest(&line) {
                self.digests.insert(digest, idx);
                lines += 1;
            }
        }

        println!(
            "Loaded database file {}: {} lines, {} unique digests total in {:.2?}",
            path.display(),
            lines,
            self.digests.len(),
            start.elapsed()
        );
        Ok(())
    }

    /// Looks up a normalized (lowercase hex) digest.
    pub fn lookup(&self, digest: &str) -> Option<SourceIndex> {
        self.digests.get(digest).copied()
    }

    /// Display name of a source list.
    pub fn source_name(&self, idx: SourceIndex) -> &str {
        &self.sources[idx]
    }

    /// Source list names, in load order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Number of unique digests across all lists.
    pub fn len(&self) -> usize {
        self.digests.len()
    }

    /// True when no usable digest list was found.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Normalizes one database line to a canonical digest key.
///
/// Trims surrounding whitespace, truncates to the canonical width and
/// lowercases. Blank lines and lines containing non-hex characters yield
/// `None` and are discarded silently.
pub fn normalize_digest(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let truncated: String = trimmed.chars().take(DIGEST_HEX_LEN).collect();
    if !truncated.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(truncated.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_digest("  DA39A3EE5E6B4B0D3255BFEF95601890AFD80709  "),
            Some("da39a3ee5e6b4b0d3255bfef95601890afd80709".to_string())
        );
    }

    #[test]
    fn test_normalize_truncates_long_lines_to_digest_width() {
        let long = format!("{}{}", "a".repeat(DIGEST_HEX_LEN), "bcdef0");
        assert_eq!(normalize_digest(&long), Some("a".repeat(DIGEST_HEX_LEN)));
    }

    #[test]
    fn test_normalize_keeps_short_lines_as_is() {
        // A short hex line can never match a real digest, but it is stored
        // rather than rejected.
        assert_eq!(normalize_digest("abc123"), Some("abc123".to_string()));
    }

    #[test]
    fn test_normalize_rejects_blank_and_non_hex_lines() {
        assert_eq!(normalize_digest(""), None);
        assert_eq!(normalize_digest("   "), None);
        assert_eq!(normalize_digest("not a digest"), None);
        assert_eq!(normalize_digest("xyz123"), None);
    }
}
