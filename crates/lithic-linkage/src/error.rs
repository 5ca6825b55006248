//! Error types for linkage operations.

/// Errors that can occur during signature parsing and scaffold generation.
#[derive(Debug, thiserror::Error)]
pub enum LinkageError {
    /// Failed to parse a C function signature.
    #[error("invalid C signature: {detail}")]
    InvalidSignature {
        /// What was wrong with the signature.
        detail: String,
    },

    /// A symbol name is not a valid C identifier.
    #[error("invalid identifier '{name}'")]
    InvalidIdentifier {
        /// The offending name.
        name: String,
    },
}

/// Result type for linkage operations.
pub type Result<T> = std::result::Result<T, LinkageError>;
