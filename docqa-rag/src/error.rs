//! Error types for the `docqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// The declared format hint does not match any registered parser.
    #[error("Unsupported document format: {hint}")]
    UnsupportedFormat {
        /// The format hint that no parser accepted.
        hint: String,
    },

    /// The document bytes could not be parsed as the declared format.
    #[error("Corrupt document '{source_name}': {message}")]
    CorruptDocument {
        /// The caller-provided document name.
        source_name: String,
        /// A description of the structural failure.
        message: String,
    },

    /// An index build was attempted with no segments.
    #[error("Cannot build an index from an empty document set")]
    EmptyDocumentSet,

    /// A query arrived before any index was built.
    #[error("No index has been built yet")]
    IndexNotReady,

    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for retrieval operations.
pub type Result<T> = std::result::Result<T, RagError>;
