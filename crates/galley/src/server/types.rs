//! JSON types for the HTTP API

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum suggestions returned by the autocomplete endpoint
pub const MAX_SUGGESTIONS: usize = 5;

/// Maximum results returned by the search endpoint
pub const MAX_RESULTS: usize = 16;

/// Nearest-neighbor candidate pool for vector search
pub const VECTOR_CANDIDATES: usize = 50;

/// Nearest-neighbor result cap before the final merge
pub const VECTOR_LIMIT: usize = 6;

/// Query parameters for `/api/autocomplete` and `/api/search`
#[derive(Debug, Deserialize)]
pub struct QueryParams {
  pub q: Option<String>,
}

/// A single autocomplete suggestion
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SuggestionData {
  /// Recipe identifier
  pub id: String,

  /// Recipe title
  pub title: String,
}

/// Response for `/api/autocomplete`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AutocompleteResponse {
  /// Up to five suggestions, best first
  pub suggestions: Vec<SuggestionData>,
}

impl AutocompleteResponse {
  pub fn empty() -> Self {
    Self { suggestions: Vec::new() }
  }
}

/// A single search hit
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchHitData {
  /// Recipe title
  pub title: String,

  /// Recipe description
  pub description: String,

  /// Relevance score, higher is better
  pub score: f32,
}

/// Response for `/api/search`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
  /// Ranked results, best first
  pub results: Vec<SearchHitData>,

  /// Number of results
  pub count: usize,
}

impl SearchResponse {
  pub fn empty() -> Self {
    Self { results: Vec::new(), count: 0 }
  }
}

/// Response for `/status`
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StatusResponse {
  /// Always "ok" when the service is up
  pub status: String,

  /// Service version
  pub version: String,

  /// Active search mode
  pub mode: String,
}
