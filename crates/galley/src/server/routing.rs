//! Axum router configuration for all endpoints

use axum::{routing::get, Router};

use crate::server::handlers::{autocomplete, search, status};
use crate::server::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    .route("/status", get(status::status))
    .route("/api/autocomplete", get(autocomplete::autocomplete))
    .route("/api/search", get(search::search))
    .with_state(state)
}
