//! # docqa-rag
//!
//! Retrieval primitives for the docqa document-QA core: loading uploaded
//! documents into [`Segment`]s, embedding them with an [`EmbeddingModel`],
//! and answering k-nearest queries against a [`VectorIndex`].
//!
//! The index is replace-on-rebuild: each upload builds a fresh index in one
//! bulk operation; nothing here mutates an index incrementally. Orchestration
//! (safety gates, grounding checks, answer generation) lives in
//! `docqa-engine`.

pub mod config;
pub mod document;
pub mod embedding;
pub mod error;
pub mod index;
pub mod loader;

#[cfg(feature = "openai")]
pub mod openai;

pub use config::RetrievalConfig;
pub use document::{EmbeddedSegment, RetrievalHit, Segment};
pub use embedding::{Device, EmbedderConfig, EmbeddingModel, HashEmbedder};
pub use error::{RagError, Result};
pub use index::VectorIndex;
pub use loader::{DocumentLoader, FormatHint};

#[cfg(feature = "openai")]
pub use openai::OpenAiEmbedder;
