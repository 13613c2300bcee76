//! Common-file copy and platform header generation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::copy::{copy_verbatim, write_atomic};
use crate::enumerate::list_files;
use crate::error::{Result, RewriteError};
use crate::transform::Transformer;

/// Where generated files are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Native build output directory (the enumeration base).
    pub objs_dir: PathBuf,
    /// Root of the generated configuration trees.
    pub configs_dir: PathBuf,
    /// Accepted file extensions.
    pub suffixes: Vec<String>,
    /// Subdirectories of `objs_dir` copied verbatim.
    pub common_subdirs: Vec<PathBuf>,
    /// Subdirectory of `objs_dir` holding the platform-dependent headers.
    pub platform_subdir: PathBuf,
}

impl Layout {
    /// Layout with the default suffixes and subdirectories.
    pub fn new(objs_dir: impl Into<PathBuf>, configs_dir: impl Into<PathBuf>) -> Self {
        Self {
            objs_dir: objs_dir.into(),
            configs_dir: configs_dir.into(),
            suffixes: Self::default_suffixes(),
            common_subdirs: Self::default_common_subdirs(),
            platform_subdir: Self::default_platform_subdir(),
        }
    }

    pub fn default_suffixes() -> Vec<String> {
        vec!["h".into(), "inc".into(), "def".into()]
    }

    pub fn default_common_subdirs() -> Vec<PathBuf> {
        [
            "include/llvm/IR",
            "include/llvm/Support",
            "lib/IR",
            "lib/Target/AArch64",
            "lib/Target/ARM",
            "lib/Target/X86",
            "lib/Transforms/InstCombine",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect()
    }

    pub fn default_platform_subdir() -> PathBuf {
        PathBuf::from("include/llvm/Config")
    }

    /// Destination of platform-independent files.
    pub fn common_output_dir(&self) -> PathBuf {
        self.configs_dir.join("common")
    }

    /// Destination of one platform's rewritten headers.
    pub fn platform_output_dir(&self, platform: &str) -> PathBuf {
        self.configs_dir.join(platform)
    }
}

/// Counts reported by a generation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Files written.
    pub files: usize,
    /// Lines rewritten by a pattern rule (zero for verbatim copies).
    pub rewritten_lines: usize,
}

/// Copy the platform-independent generated files into `layout.common_output_dir()`.
pub fn copy_common_files(layout: &Layout) -> Result<GenerateSummary> {
    let dst_base = layout.common_output_dir();
    let mut summary = GenerateSummary::default();
    for subdir in &layout.common_subdirs {
        for pair in list_files(&layout.objs_dir, subdir, &dst_base, &layout.suffixes)? {
            let pair = pair?;
            copy_verbatim(&pair.src, &pair.dst)?;
            summary.files += 1;
        }
        tracing::debug!(subdir = %subdir.display(), "copied common subdirectory");
    }
    tracing::info!(files = summary.files, dst = %dst_base.display(), "copied common files");
    Ok(summary)
}

/// Rewrite one header from `src` into `dst`, returning the number of rewritten lines.
pub fn transform_file(transformer: &Transformer<'_>, src: &Path, dst: &Path) -> Result<usize> {
    let text = fs::read_to_string(src).map_err(|e| RewriteError::io(src, e))?;
    let mut out = String::with_capacity(text.len());
    let rewritten = transformer.transform_into(&text, &mut out);
    write_atomic(dst, out.as_bytes())?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), rewritten, "transformed");
    Ok(rewritten)
}

/// Rewrite the platform-dependent headers into `layout.platform_output_dir(..)`.
pub fn generate_platform_files(
    transformer: &Transformer<'_>,
    layout: &Layout,
) -> Result<GenerateSummary> {
    let platform = &transformer.platform().name;
    let dst_base = layout.platform_output_dir(platform);
    let mut summary = GenerateSummary::default();
    for pair in list_files(
        &layout.objs_dir,
        &layout.platform_subdir,
        &dst_base,
        &layout.suffixes,
    )? {
        let pair = pair?;
        summary.rewritten_lines += transform_file(transformer, &pair.src, &pair.dst)?;
        summary.files += 1;
    }
    tracing::info!(
        platform = %platform,
        files = summary.files,
        rewritten = summary.rewritten_lines,
        "generated platform headers"
    );
    Ok(summary)
}
