//! Embedding model trait and the built-in deterministic provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A model that maps text to a fixed-length dense vector.
///
/// Implementations must be deterministic: identical text and model
/// configuration always yield a numerically stable, identical vector.
/// The default [`embed_many`](EmbeddingModel::embed_many) implementation
/// calls [`embed`](EmbeddingModel::embed) element-wise; backends with
/// native batching should override it, but the result must stay
/// semantically equivalent to the element-wise mapping.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Embed a single text into a vector of [`dimensions`](EmbeddingModel::dimensions) length.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts.
    ///
    /// Equivalent to mapping [`embed`](EmbeddingModel::embed) over each
    /// item, regardless of batch size.
    async fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// The dimensionality of vectors produced by this model.
    fn dimensions(&self) -> usize;
}

/// Device an embedding model runs on.
///
/// The built-in [`HashEmbedder`] computes on the CPU regardless; the option
/// exists so remote or accelerated backends share one configuration shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Run on the CPU.
    #[default]
    Cpu,
    /// Run on a GPU if the backend supports one.
    Gpu,
}

/// Configuration for constructing an embedding model.
///
/// Loaded once at process start; the resulting model handle is immutable
/// and reused for all requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedderConfig {
    /// Model identifier. Feeds the hash seed of [`HashEmbedder`], so
    /// different model names produce different embedding spaces.
    pub model: String,
    /// Device to run on.
    pub device: Device,
    /// Output vector dimensionality.
    pub dimensions: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self { model: "hash-minilm-384".to_string(), device: Device::Cpu, dimensions: 384 }
    }
}

/// A deterministic, dependency-free embedding model.
///
/// Hashes the input bytes (seeded by the model name), then fills an
/// L2-normalized vector whose direction depends on the content. Semantically
/// similar texts do not land near each other — this is a stand-in for a real
/// sentence encoder — but it is fast, deterministic, and needs no API key,
/// which is what the index and orchestrator contracts require.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    seed: u64,
    dimensions: usize,
}

impl HashEmbedder {
    /// Build from configuration.
    pub fn new(config: EmbedderConfig) -> Self {
        let seed = config
            .model
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| acc.wrapping_mul(0x100_0000_01b3).wrapping_add(b as u64));
        Self { seed, dimensions: config.dimensions }
    }

    /// Build with the default configuration (384 dimensions, CPU).
    pub fn with_defaults() -> Self {
        Self::new(EmbedderConfig::default())
    }

    fn embed_sync(&self, text: &str) -> Vec<f32> {
        let hash = text
            .bytes()
            .fold(self.seed, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut embedding = vec![0.0f32; self.dimensions];
        for (i, value) in embedding.iter_mut().enumerate() {
            *value = ((hash.wrapping_add(i as u64)) as f32).sin();
        }
        // L2-normalize so cosine similarity reduces to the dot product.
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            embedding.iter_mut().for_each(|x| *x /= norm);
        }
        embedding
    }
}

#[async_trait]
impl EmbeddingModel for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let model = HashEmbedder::with_defaults();
        let a = model.embed("the sky is blue").await.unwrap();
        let b = model.embed("the sky is blue").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), model.dimensions());
    }

    #[tokio::test]
    async fn model_name_changes_the_space() {
        let a = HashEmbedder::new(EmbedderConfig {
            model: "model-a".into(),
            ..EmbedderConfig::default()
        });
        let b = HashEmbedder::new(EmbedderConfig {
            model: "model-b".into(),
            ..EmbedderConfig::default()
        });
        assert_ne!(a.embed("same text").await.unwrap(), b.embed("same text").await.unwrap());
    }

    #[tokio::test]
    async fn embeddings_are_normalized() {
        let model = HashEmbedder::with_defaults();
        let v = model.embed("anything").await.unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }
}
