//! In-memory vector index over embedded segments, using cosine distance.
//!
//! An index is built once from a full document set and never mutated; a new
//! upload builds a new index and replaces the old one wholesale. Insertion
//! order is preserved so that equal-distance results rank stably.

use tracing::info;

use crate::document::{EmbeddedSegment, RetrievalHit, Segment};
use crate::embedding::EmbeddingModel;
use crate::error::{RagError, Result};

/// A searchable collection of [`EmbeddedSegment`]s for one document set.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    entries: Vec<EmbeddedSegment>,
}

/// Cosine distance between two vectors: `1 - cosine_similarity`.
///
/// A zero-magnitude vector has similarity 0, i.e. distance 1, so it ranks
/// below any positively correlated segment.
fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - dot / (norm_a * norm_b)
}

impl VectorIndex {
    /// Embed every segment and construct a searchable index.
    ///
    /// One bulk operation: all segments are embedded through
    /// [`embed_many`](EmbeddingModel::embed_many) and stored in input order.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyDocumentSet`] if `segments` is empty.
    /// - [`RagError::EmbeddingError`] if the embedding backend fails.
    pub async fn build(model: &dyn EmbeddingModel, segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(RagError::EmptyDocumentSet);
        }

        let texts: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        let embeddings = model.embed_many(&texts).await?;

        let entries: Vec<EmbeddedSegment> = segments
            .into_iter()
            .zip(embeddings)
            .map(|(segment, embedding)| EmbeddedSegment { segment, embedding })
            .collect();

        info!(segment_count = entries.len(), "built vector index");
        Ok(Self { entries })
    }

    /// Return up to `k` nearest segments by ascending cosine distance.
    ///
    /// Ties are broken by original insertion order (the sort is stable).
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Vec<RetrievalHit> {
        let mut hits: Vec<RetrievalHit> = self
            .entries
            .iter()
            .map(|entry| RetrievalHit {
                segment: entry.segment.clone(),
                distance: cosine_distance(&entry.embedding, query_embedding),
            })
            .collect();

        hits.sort_by(|a, b| a.distance.partial_cmp(&b.distance).unwrap_or(std::cmp::Ordering::Equal));
        hits.truncate(k);
        hits
    }

    /// Number of embedded segments in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no segments.
    ///
    /// Always false for an index produced by [`build`](VectorIndex::build).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;

    fn segment(content: &str, index: usize) -> Segment {
        Segment { content: content.to_string(), source: "doc.txt".to_string(), sequence_index: index }
    }

    #[tokio::test]
    async fn empty_document_set_is_rejected() {
        let model = HashEmbedder::with_defaults();
        let err = VectorIndex::build(&model, Vec::new()).await.unwrap_err();
        assert!(matches!(err, RagError::EmptyDocumentSet));
    }

    #[tokio::test]
    async fn search_returns_at_most_k() {
        let model = HashEmbedder::with_defaults();
        let segments = (0..10).map(|i| segment(&format!("segment {i}"), i)).collect();
        let index = VectorIndex::build(&model, segments).await.unwrap();

        let query = model.embed("segment 3").await.unwrap();
        assert_eq!(index.search(&query, 4).len(), 4);
        assert_eq!(index.search(&query, 100).len(), 10);
    }

    #[tokio::test]
    async fn exact_match_ranks_first() {
        let model = HashEmbedder::with_defaults();
        let segments = vec![segment("alpha", 0), segment("beta", 1), segment("gamma", 2)];
        let index = VectorIndex::build(&model, segments).await.unwrap();

        let query = model.embed("beta").await.unwrap();
        let hits = index.search(&query, 3);
        assert_eq!(hits[0].segment.content, "beta");
        assert!(hits[0].distance < 1e-5);
    }
}
