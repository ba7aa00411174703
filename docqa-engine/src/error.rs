//! Error types for the `docqa-engine` crate.
//!
//! Only system failures live here. Policy violations, ungrounded answers,
//! and the missing-index notice are ordinary
//! [`AnswerOutcome`](crate::AnswerOutcome) variants, not errors.

use thiserror::Error;

/// System failures surfaced to the service boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A retrieval-side failure: loading, embedding, or index construction.
    #[error(transparent)]
    Rag(#[from] docqa_rag::RagError),

    /// A generation backend failure.
    #[error(transparent)]
    Model(#[from] docqa_model::ModelError),

    /// An engine construction/configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
