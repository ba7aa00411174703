//! Data types for segments, embedded segments, and retrieval results.

use serde::{Deserialize, Serialize};

/// A unit of retrievable text extracted from an uploaded document.
///
/// Segments are immutable once created: the loader produces them, the
/// index embeds and owns them, and retrieval hands out clones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    /// The text content of the segment.
    pub content: String,
    /// Identifier of the originating document (the caller-provided name).
    pub source: String,
    /// Position within the document (page number for PDFs, 0 otherwise).
    pub sequence_index: usize,
}

/// A [`Segment`] paired with its dense vector embedding.
///
/// Created during index construction; owned by the [`VectorIndex`](crate::VectorIndex)
/// for the lifetime of the index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedSegment {
    /// The segment this embedding was computed from.
    pub segment: Segment,
    /// The embedding vector.
    pub embedding: Vec<f32>,
}

/// A retrieved [`Segment`] paired with its distance to the query vector.
///
/// Lower distance means more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalHit {
    /// The retrieved segment.
    pub segment: Segment,
    /// Cosine distance between the segment and the query (lower is closer).
    pub distance: f32,
}
