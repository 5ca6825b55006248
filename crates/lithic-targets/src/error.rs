//! Error types for target identity operations.

use std::path::PathBuf;

/// Errors that can occur while loading or resolving targets.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// I/O error reading/writing target files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Target file not found.
    #[error("target file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Target name not in the built-in catalog.
    #[error("unknown target: '{name}'")]
    UnknownTarget {
        /// The name that failed to resolve.
        name: String,
    },

    /// Target triple could not be interpreted.
    #[error("unrecognized target triple '{triple}': {detail}")]
    UnknownTriple {
        /// The triple as given.
        triple: String,
        /// Which component failed to parse.
        detail: String,
    },
}

/// Result type for target operations.
pub type Result<T> = std::result::Result<T, TargetError>;
