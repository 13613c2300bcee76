//! Deterministic discovery of candidate files.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, RewriteError};

/// A source file and the destination it mirrors to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Absolute source path.
    pub src: PathBuf,
    /// Destination path: `dst_base` joined with the path relative to the source base.
    pub dst: PathBuf,
}

/// Whether `path`'s extension is one of `suffixes` (given with or without the dot).
pub fn has_suffix(path: &Path, suffixes: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    suffixes.iter().any(|s| s.trim_start_matches('.') == ext)
}

/// Enumerate files under `src_base/subdir` whose extension is in `suffixes`.
///
/// Entries are visited in file-name order so repeated runs see the same sequence.
/// The destination keeps the path relative to `src_base`, not to `subdir`.
pub fn list_files<'a>(
    src_base: &Path,
    subdir: &Path,
    dst_base: &Path,
    suffixes: &'a [String],
) -> Result<impl Iterator<Item = Result<FilePair>> + 'a> {
    if !src_base.is_dir() {
        return Err(RewriteError::SourceDirMissing {
            path: src_base.to_path_buf(),
        });
    }
    let src_base = std::path::absolute(src_base).map_err(|e| RewriteError::io(src_base, e))?;
    let root = src_base.join(subdir);
    if !root.is_dir() {
        return Err(RewriteError::MissingSubdir { path: root });
    }
    let dst_base = dst_base.to_path_buf();

    let walker = WalkDir::new(&root).sort_by_file_name().into_iter();
    Ok(walker.filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Some(Err(RewriteError::from(e))),
        };
        if entry.file_type().is_dir() || !has_suffix(entry.path(), suffixes) {
            return None;
        }
        let relative = entry.path().strip_prefix(&src_base).ok()?;
        Some(Ok(FilePair {
            src: entry.path().to_path_buf(),
            dst: dst_base.join(relative),
        }))
    }))
}
