//! # docqa-engine
//!
//! The RAG orchestrator for docqa. Sequences the document loader, embedding
//! model, vector index, safety filter, and answer generator into two flows:
//!
//! - **Ingestion**: raw bytes + filename → segments → embeddings → a fresh
//!   [`VectorIndex`](docqa_rag::VectorIndex) that atomically replaces the
//!   active one.
//! - **Answering**: query → safety gate → k-nearest retrieval → grounding
//!   gate → generation → safety gate → [`Answer`] with source citations.
//!
//! Policy refusals and ungrounded results are business outcomes
//! ([`AnswerOutcome`] variants); only backend failures surface as
//! [`EngineError`]. The HTTP collaborator maps [`QueryResponse`] and
//! [`IngestReceipt`] onto the transport.

pub mod engine;
pub mod error;
pub mod outcome;
pub mod prompt;

pub use engine::{RagEngine, RagEngineBuilder};
pub use error::{EngineError, Result};
pub use outcome::{
    Answer, AnswerOutcome, IngestReceipt, NOTICE_ANSWER_POLICY, NOTICE_NO_INDEX,
    NOTICE_QUERY_POLICY, NOTICE_UNGROUNDED, QueryResponse,
};
