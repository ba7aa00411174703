//! # docqa-model
//!
//! Generation model integrations for the docqa core.
//!
//! Provides the [`GenerationModel`] trait, a deterministic [`MockGenerator`]
//! for tests and demos, and (behind the `openai` feature) an
//! [`OpenAiGenerator`] for OpenAI-compatible chat completions APIs.
//!
//! A generation backend failure is a system failure, never a business
//! outcome: implementations return [`ModelError`] and callers propagate it.

use async_trait::async_trait;
use thiserror::Error;

pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;

pub use mock::MockGenerator;
#[cfg(feature = "openai")]
pub use openai::OpenAiGenerator;

/// Errors from generation model backends.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend was unreachable or returned an error.
    #[error("Generation error ({provider}): {message}")]
    Backend {
        /// The provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A convenience result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// A language model that produces free-form text from a prompt.
///
/// The prompt carries all conditioning (retrieved context plus the user's
/// question); implementations hold no per-request state. Load once at
/// process start and reuse the handle for all requests.
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Name of the underlying model, for logging.
    fn name(&self) -> &str;
}
