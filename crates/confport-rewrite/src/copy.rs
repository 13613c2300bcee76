//! Verbatim copies and atomic writes.
//!
//! Destination directories are created on demand. File contents are written to a
//! temporary file next to the destination and renamed into place, so a
//! destination is never observed half-written.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, RewriteError};

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| RewriteError::io(parent, e))?;
    }
    Ok(())
}

/// Write `contents` to `dst`, replacing any existing file atomically.
pub fn write_atomic(dst: &Path, contents: &[u8]) -> Result<()> {
    ensure_parent(dst)?;
    let dir = match dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => dir,
        None => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| RewriteError::io(dir, e))?;
    tmp.write_all(contents)
        .and_then(|()| tmp.flush())
        .map_err(|e| RewriteError::io(dst, e))?;
    tmp.persist(dst).map_err(|e| RewriteError::io(dst, e.error))?;
    Ok(())
}

/// Copy `src` to `dst` byte for byte.
pub fn copy_verbatim(src: &Path, dst: &Path) -> Result<()> {
    let bytes = fs::read(src).map_err(|e| RewriteError::io(src, e))?;
    write_atomic(dst, &bytes)?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), "copied");
    Ok(())
}
