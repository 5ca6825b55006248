//! Error types for define table operations.

/// Errors that can occur while building a define table.
#[derive(Debug, thiserror::Error)]
pub enum DefineError {
    /// A `-D` style flag could not be parsed.
    #[error("invalid define flag '{flag}': {detail}")]
    InvalidFlag {
        /// The flag as given.
        flag: String,
        /// What was wrong with it.
        detail: String,
    },

    /// A symbol name is not a valid C identifier.
    #[error("invalid symbol name '{name}'")]
    InvalidName {
        /// The offending name.
        name: String,
    },
}

/// Result type for define table operations.
pub type Result<T> = std::result::Result<T, DefineError>;
