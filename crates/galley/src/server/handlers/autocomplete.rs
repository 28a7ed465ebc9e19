//! Autocomplete endpoint handler

use axum::{
  extract::{Query, State},
  http::StatusCode,
  response::Json,
};
use tracing::error;

use crate::server::types::{AutocompleteResponse, QueryParams, SuggestionData, MAX_SUGGESTIONS};
use crate::server::AppState;

/// GET /api/autocomplete?q=<string> - Title suggestions for a partial query
///
/// Missing or empty `q` returns an empty suggestion list without touching
/// the store. A store failure also degrades to an empty list, with a 500
/// status; clients treat both identically to "no suggestions".
pub async fn autocomplete(
  State(state): State<AppState>,
  Query(params): Query<QueryParams>,
) -> (StatusCode, Json<AutocompleteResponse>) {
  let query = params.q.unwrap_or_default();
  let query = query.trim();

  if query.is_empty() {
    return (StatusCode::OK, Json(AutocompleteResponse::empty()));
  }

  match state.store.suggest_titles(query, MAX_SUGGESTIONS).await {
    Ok(suggestions) => {
      let suggestions = suggestions
        .into_iter()
        .map(|s| SuggestionData { id: s.id.to_string(), title: s.title })
        .collect();
      (StatusCode::OK, Json(AutocompleteResponse { suggestions }))
    }
    Err(e) => {
      error!(query, error = %e, "autocomplete lookup failed");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(AutocompleteResponse::empty()))
    }
  }
}
