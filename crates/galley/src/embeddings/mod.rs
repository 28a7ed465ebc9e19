//! Embedding provider abstraction
//!
//! Given text, a provider returns one fixed-length numeric vector. The
//! production provider calls a remote API; `FakeEmbeddings` backs tests and
//! offline demos with deterministic vectors.

pub mod remote;

use async_trait::async_trait;
use thiserror::Error;

pub use remote::RemoteEmbeddings;

/// Errors from the embedding provider
///
/// `Generation` covers a provider that answered but produced no usable
/// vector; `Transport` covers the network path.
#[derive(Debug, Error)]
pub enum EmbeddingError {
  #[error("embedding generation failed: {0}")]
  Generation(String),

  #[error("embedding request failed: {0}")]
  Transport(#[from] reqwest::Error),
}

/// A service that turns text into fixed-dimension vectors
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
  /// Compute the embedding of `text`
  async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

  /// Output dimensionality of this provider
  fn dimension(&self) -> usize;
}

/// Deterministic offline provider
///
/// Hashes tokens into a fixed number of buckets and normalizes the counts,
/// so texts sharing words land near each other under cosine similarity.
pub struct FakeEmbeddings {
  dimension: usize,
}

impl FakeEmbeddings {
  pub fn new(dimension: usize) -> Self {
    Self { dimension }
  }
}

impl Default for FakeEmbeddings {
  fn default() -> Self {
    Self::new(384)
  }
}

fn bucket_of(token: &str, dimension: usize) -> usize {
  // FNV-1a, stable across platforms
  let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
  for byte in token.bytes() {
    hash ^= u64::from(byte);
    hash = hash.wrapping_mul(0x100_0000_01b3);
  }
  (hash % dimension as u64) as usize
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddings {
  async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
    let mut vector = vec![0.0f32; self.dimension];
    for token in crate::fuzzy::tokenize(text) {
      vector[bucket_of(&token, self.dimension)] += 1.0;
    }

    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude == 0.0 {
      return Err(EmbeddingError::Generation("input text has no tokens".to_string()));
    }

    for value in &mut vector {
      *value /= magnitude;
    }
    Ok(vector)
  }

  fn dimension(&self) -> usize {
    self.dimension
  }
}
