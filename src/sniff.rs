//! Plain-text probe deciding which database directory entries are loadable.

use anyhow::{Context, Result};
use content_inspector::inspect;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const PROBE_LEN: usize = 1024;

/// Returns true if the file's leading bytes look like plain text.
///
/// Empty files are treated as non-text; they cannot contain digests.
pub fn is_plain_text(path: &Path) -> Result<bool> {
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut buf = [0u8; PROBE_LEN];
    let n = file
        .read(&mut buf)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if n == 0 {
        return Ok(false);
    }
    Ok(inspect(&buf[..n]).is_text())
}
