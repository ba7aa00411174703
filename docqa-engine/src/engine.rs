//! The RAG orchestrator.
//!
//! [`RagEngine`] sequences the ingestion flow (load → embed → index → swap)
//! and the query-answering flow (safety gate → retrieve → grounding gate →
//! generate → safety gate → respond), shaping terminal outcomes as
//! [`AnswerOutcome`] values.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use docqa_engine::RagEngine;
//! use docqa_rag::HashEmbedder;
//! use docqa_model::MockGenerator;
//!
//! let engine = RagEngine::builder()
//!     .embedder(Arc::new(HashEmbedder::with_defaults()))
//!     .generator(Arc::new(MockGenerator::replying("...")))
//!     .build()?;
//!
//! engine.ingest(bytes, "notes.txt").await?;
//! let outcome = engine.answer("What color is the sky?").await?;
//! ```

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use docqa_guardrail::{KeywordFilter, ScreeningMode};
use docqa_model::GenerationModel;
use docqa_rag::{
    DocumentLoader, EmbeddingModel, FormatHint, RagError, RetrievalConfig, VectorIndex,
};

use crate::error::{EngineError, Result};
use crate::outcome::{Answer, AnswerOutcome, IngestReceipt};
use crate::prompt::build_prompt;

/// Orchestrates document ingestion and query answering over a single
/// active vector index.
///
/// The index slot is copy-on-write: `answer` clones the current `Arc`
/// under a short read lock and searches without holding it, while `ingest`
/// builds the replacement entirely outside the lock and swaps it in only on
/// full success. A query therefore observes either the fully-old or the
/// fully-new index, never a partial one, and a failed upload leaves the
/// previous index serving.
pub struct RagEngine {
    loader: DocumentLoader,
    embedder: Arc<dyn EmbeddingModel>,
    generator: Arc<dyn GenerationModel>,
    filter: KeywordFilter,
    config: RetrievalConfig,
    index: RwLock<Option<Arc<VectorIndex>>>,
}

impl RagEngine {
    /// Create a new [`RagEngineBuilder`].
    pub fn builder() -> RagEngineBuilder {
        RagEngineBuilder::default()
    }

    /// Return a reference to the retrieval configuration.
    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Snapshot of the currently active index.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::IndexNotReady`] if no index has ever been built.
    pub async fn snapshot(&self) -> docqa_rag::Result<Arc<VectorIndex>> {
        self.index.read().await.clone().ok_or(RagError::IndexNotReady)
    }

    /// Ingest an uploaded document, replacing the active index on success.
    ///
    /// The format is derived from the filename extension. The new index is
    /// built off to the side; any failure leaves the previous index (if any)
    /// untouched and serving.
    ///
    /// # Errors
    ///
    /// Propagates loader failures ([`RagError::UnsupportedFormat`],
    /// [`RagError::CorruptDocument`]), [`RagError::EmptyDocumentSet`], and
    /// embedding backend failures.
    pub async fn ingest(&self, bytes: &[u8], filename: &str) -> Result<IngestReceipt> {
        let hint = FormatHint::from_name(filename);
        let segments = self.loader.load(bytes, filename, hint).inspect_err(|e| {
            error!(source = filename, error = %e, "document load failed");
        })?;

        let index = VectorIndex::build(self.embedder.as_ref(), segments).await.inspect_err(
            |e| {
                error!(source = filename, error = %e, "index build failed");
            },
        )?;
        let segment_count = index.len();

        // Swap only after the build fully succeeded.
        let mut slot = self.index.write().await;
        *slot = Some(Arc::new(index));
        drop(slot);

        info!(source = filename, segment_count, "document ingested");
        Ok(IngestReceipt::new(segment_count))
    }

    /// Answer a query against the active index.
    ///
    /// Runs the request state machine: missing-index check, query safety
    /// gate (substring), retrieval, grounding gate, generation, answer
    /// safety gate (whole-word). Every early exit is a normal
    /// [`AnswerOutcome`], not an error.
    ///
    /// # Errors
    ///
    /// Only system failures: embedding or generation backend errors.
    pub async fn answer(&self, query: &str) -> Result<AnswerOutcome> {
        let index = match self.snapshot().await {
            Ok(index) => index,
            Err(RagError::IndexNotReady) => {
                info!(query, "query before any upload");
                return Ok(AnswerOutcome::NoIndex);
            }
            Err(e) => return Err(EngineError::Rag(e)),
        };

        // Query gate: substring matching, stricter than the answer gate.
        if !self.filter.is_safe(query, ScreeningMode::Substring) {
            warn!(query, "query rejected by safety policy");
            return Ok(AnswerOutcome::QueryRejected);
        }

        let query_embedding = self.embedder.embed(query).await?;
        let hits = index.search(&query_embedding, self.config.top_k);

        // Grounding gate: without usable context, do not generate at all.
        if hits.is_empty() || hits.iter().all(|h| h.segment.content.trim().is_empty()) {
            info!(query, hit_count = hits.len(), "no usable context retrieved");
            return Ok(AnswerOutcome::Ungrounded);
        }

        let prompt = build_prompt(query, &hits);
        let content = self.generator.generate(&prompt).await.inspect_err(|e| {
            error!(query, error = %e, "generation failed");
        })?;

        // Answer gate: whole-word matching, so legitimate text containing a
        // blocked term inside a longer word is not suppressed.
        if !self.filter.is_safe(&content, ScreeningMode::WholeWord) {
            warn!(query, "generated answer rejected by safety policy");
            return Ok(AnswerOutcome::AnswerRejected);
        }

        let mut sources: Vec<String> = Vec::new();
        for hit in &hits {
            if !sources.contains(&hit.segment.source) {
                sources.push(hit.segment.source.clone());
            }
        }

        info!(query, response = %content, sources = ?sources, "answered query");
        Ok(AnswerOutcome::Answered(Answer { content, sources }))
    }
}

/// Builder for constructing a [`RagEngine`].
///
/// The embedder and generator are required; the loader, safety filter, and
/// retrieval configuration default to the standard service policy.
#[derive(Default)]
pub struct RagEngineBuilder {
    loader: Option<DocumentLoader>,
    embedder: Option<Arc<dyn EmbeddingModel>>,
    generator: Option<Arc<dyn GenerationModel>>,
    filter: Option<KeywordFilter>,
    config: Option<RetrievalConfig>,
}

impl RagEngineBuilder {
    /// Set the document loader.
    pub fn loader(mut self, loader: DocumentLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Set the embedding model.
    pub fn embedder(mut self, embedder: Arc<dyn EmbeddingModel>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the generation model.
    pub fn generator(mut self, generator: Arc<dyn GenerationModel>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Set the blocked-term safety filter (applied to queries and answers).
    pub fn filter(mut self, filter: KeywordFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the retrieval configuration.
    pub fn config(mut self, config: RetrievalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the [`RagEngine`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigError`] if the embedder or generator is
    /// missing.
    pub fn build(self) -> Result<RagEngine> {
        let embedder = self
            .embedder
            .ok_or_else(|| EngineError::ConfigError("embedder is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| EngineError::ConfigError("generator is required".to_string()))?;

        Ok(RagEngine {
            loader: self.loader.unwrap_or_else(DocumentLoader::new),
            embedder,
            generator,
            filter: self.filter.unwrap_or_default(),
            config: self.config.unwrap_or_default(),
            index: RwLock::new(None),
        })
    }
}
