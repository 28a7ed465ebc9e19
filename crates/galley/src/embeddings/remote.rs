//! Remote embedding provider over HTTP

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingsConfig;
use crate::embeddings::{EmbeddingError, EmbeddingProvider};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
  model: &'a str,
  input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
  data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
  embedding: Vec<f32>,
}

/// Embedding provider backed by a remote embeddings API
///
/// Posts `{model, input}` and reads one vector back. The provider is
/// rate-limited; callers batch their requests and pace the batches.
pub struct RemoteEmbeddings {
  client: reqwest::Client,
  config: EmbeddingsConfig,
}

impl RemoteEmbeddings {
  pub fn new(config: EmbeddingsConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbeddings {
  async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
    let request = EmbeddingRequest { model: &self.config.model, input: text };

    let mut builder = self.client.post(&self.config.url).json(&request);
    if let Some(key) = &self.config.api_key {
      builder = builder.bearer_auth(key);
    }

    let response = builder.send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(EmbeddingError::Generation(format!(
        "provider returned {status}: {body}"
      )));
    }

    let parsed: EmbeddingResponse = response.json().await?;
    let embedding = parsed
      .data
      .into_iter()
      .next()
      .map(|d| d.embedding)
      .ok_or_else(|| EmbeddingError::Generation("response contained no embedding".to_string()))?;

    if embedding.len() != self.config.dimension {
      return Err(EmbeddingError::Generation(format!(
        "expected {} dimensions, provider returned {}",
        self.config.dimension,
        embedding.len()
      )));
    }

    Ok(embedding)
  }

  fn dimension(&self) -> usize {
    self.config.dimension
  }
}
