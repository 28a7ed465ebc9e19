//! Search endpoint handler
//!
//! One endpoint, two pipelines: fuzzy text matching or embedding
//! similarity, selected by server configuration rather than by request.

use anyhow::Result;
use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::Json,
};
use tracing::{error, warn};

use crate::config::SearchMode;
use crate::server::types::{
  QueryParams, SearchHitData, SearchResponse, MAX_RESULTS, VECTOR_CANDIDATES, VECTOR_LIMIT,
};
use crate::server::AppState;
use crate::store::ScoredRecipe;

/// The query a search request resolved to
enum SearchQuery {
  /// Absent or blank `q`: unranked default listing
  None,
  /// Ranked search for this text
  Text(String),
}

impl SearchQuery {
  fn from_param(q: Option<String>) -> Self {
    match q.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
      Some(text) => SearchQuery::Text(text),
      None => SearchQuery::None,
    }
  }
}

/// GET /api/search?q=<string> - Ranked recipe search
///
/// An empty result set for a real query is a normal 200 response; only a
/// store failure produces a 500.
pub async fn search(
  State(state): State<AppState>,
  Query(params): Query<QueryParams>,
) -> (StatusCode, Json<SearchResponse>) {
  let outcome = match SearchQuery::from_param(params.q) {
    SearchQuery::None => default_listing(&state).await,
    SearchQuery::Text(query) => match state.mode {
      SearchMode::Text => state.store.text_search(&query, MAX_RESULTS).await,
      SearchMode::Vector => vector_results(&state, &query).await,
    },
  };

  match outcome {
    Ok(results) => {
      let results: Vec<SearchHitData> = results
        .into_iter()
        .map(|r| SearchHitData {
          title: r.recipe.title,
          description: r.recipe.description,
          score: r.score,
        })
        .collect();
      let count = results.len();
      (StatusCode::OK, Json(SearchResponse { results, count }))
    }
    Err(e) => {
      error!(error = %e, "search failed");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(SearchResponse::empty()))
    }
  }
}

/// First recipes in insertion order, unranked
async fn default_listing(state: &AppState) -> Result<Vec<ScoredRecipe>> {
  let mut recipes = state.store.list().await?;
  recipes.truncate(MAX_RESULTS);
  Ok(recipes.into_iter().map(|recipe| ScoredRecipe { recipe, score: 0.0 }).collect())
}

/// Embed the query and rank by similarity
///
/// A failed query embedding degrades to keyword search for this request
/// instead of failing it.
async fn vector_results(state: &AppState, query: &str) -> Result<Vec<ScoredRecipe>> {
  let vector = match state.embeddings.embed(query).await {
    Ok(vector) => vector,
    Err(e) => {
      warn!(query, error = %e, "query embedding failed, falling back to text search");
      return state.store.text_search(query, MAX_RESULTS).await;
    }
  };

  let mut results = state.store.vector_search(&vector, VECTOR_CANDIDATES, VECTOR_LIMIT).await?;

  // Final relevance sort and hard cap after the nearest-neighbor stage.
  results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
  results.truncate(MAX_RESULTS);
  Ok(results)
}
