//! Content hashing for scanned files.
//!
//! Every eligible file gets a SHA-1 digest over its full byte content,
//! which is then matched against the loaded databases. The digest algorithm
//! is fixed; the databases store 40-hex-character (20-byte) entries.

use anyhow::{Context, Result};
use memmap2::Mmap;
use sha1::{Digest, Sha1};
use std::fmt::Write;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Width of a binary digest in bytes.
pub const DIGEST_LEN: usize = 20;

/// Width of a digest rendered as lowercase hex.
pub const DIGEST_HEX_LEN: usize = 2 * DIGEST_LEN;

/// Files at or above this size are memory-mapped instead of read in chunks.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

const READ_BUF_SIZE: usize = 1024 * 1024;

/// Computes the SHA-1 digest of a file's full content.
///
/// Large files are memory-mapped; smaller ones go through a buffered read
/// loop. Any open/read failure is returned to the caller, which records it
/// and moves on; a single unreadable file never aborts the scan.
pub fn hash_file(path: &Path) -> Result<[u8; DIGEST_LEN]> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    let mut hasher = Sha1::new();
    if len >= MMAP_THRESHOLD {
        // Safety: the mapping is read-only and dropped before the file handle.
        let mmap = unsafe { Mmap::map(&file) }
            .with_context(|| format!("failed to memory-map {}", path.display()))?;
        hasher.update(&mmap[..]);
    } else {
        let mut reader = BufReader::with_capacity(READ_BUF_SIZE, file);
        let mut buf = vec![0u8; READ_BUF_SIZE];
        loop {
            let n = reader
                .read(&mut buf)
                .with_context(|| format!("failed to read {}", path.display()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
    }

    Ok(hasher.finalize().into())
}

/// Renders a binary digest as lowercase hex, the canonical database key form.
pub fn digest_hex(digest: &[u8; DIGEST_LEN]) -> String {
    digest
        .iter()
        .fold(String::with_capacity(DIGEST_HEX_LEN), |mut acc, b| {
            let _ = write!(acc, "{b:02x}");
            acc
        })
}
