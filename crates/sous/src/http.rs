//! HTTP implementations of the request sources

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::source::{ResultsSource, SuggestionSource};
use crate::state::{SearchHit, Suggestion};

#[derive(Deserialize)]
struct SuggestionsEnvelope {
  suggestions: Vec<Suggestion>,
}

#[derive(Deserialize)]
struct ResultsEnvelope {
  results: Vec<SearchHit>,
}

/// Client for the recipe search JSON API
pub struct HttpSearchApi {
  client: reqwest::Client,
  base_url: String,
}

impl HttpSearchApi {
  /// `base_url` without a trailing slash, e.g. `http://127.0.0.1:4780`
  pub fn new(base_url: &str) -> Self {
    Self { client: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_string() }
  }
}

#[async_trait]
impl SuggestionSource for HttpSearchApi {
  async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
    let response = self
      .client
      .get(format!("{}/api/autocomplete", self.base_url))
      .query(&[("q", query)])
      .send()
      .await?;

    // A server-side failure must read exactly like "no suggestions"
    if !response.status().is_success() {
      warn!(status = %response.status(), "autocomplete endpoint errored");
      return Ok(Vec::new());
    }

    let envelope: SuggestionsEnvelope = response.json().await?;
    Ok(envelope.suggestions)
  }
}

#[async_trait]
impl ResultsSource for HttpSearchApi {
  async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
    let mut request = self.client.get(format!("{}/api/search", self.base_url));
    if !query.is_empty() {
      request = request.query(&[("q", query)]);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
      bail!("search endpoint returned {}", response.status());
    }

    let envelope: ResultsEnvelope = response.json().await?;
    Ok(envelope.results)
  }
}
