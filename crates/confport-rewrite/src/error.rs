//! Rewrite error types.

use std::path::PathBuf;

/// Errors that can occur while enumerating, copying or generating headers.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// Table lookup or validation failure.
    #[error(transparent)]
    Tables(#[from] confport_targets::TargetError),

    /// The base directory to enumerate does not exist.
    #[error("source directory not found: {}", path.display())]
    SourceDirMissing { path: PathBuf },

    /// An expected subdirectory of the build output is missing.
    #[error("expected subdirectory not found: {}", path.display())]
    MissingSubdir { path: PathBuf },

    /// A dialect prefix produced a pattern that does not compile.
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Directory traversal failure.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O error on a specific path.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The native build collaborator reported failure.
    #[error("native build failed: {detail}")]
    Build { detail: String },
}

impl RewriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for rewrite operations.
pub type Result<T> = std::result::Result<T, RewriteError>;
