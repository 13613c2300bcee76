//! Error types for table operations.

use std::path::PathBuf;

/// Errors that can occur while loading or querying target tables.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing table files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tables file not found.
    #[error("tables file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The requested platform has no triple table.
    #[error("unknown platform '{name}' (known platforms: {})", known.join(", "))]
    UnknownPlatform {
        /// The requested platform name.
        name: String,
        /// Platform names present in the tables.
        known: Vec<String>,
    },

    /// Validation error in a table definition.
    #[error("validation error: {detail}")]
    Validation {
        /// Description of the validation failure.
        detail: String,
    },
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TargetError>;
