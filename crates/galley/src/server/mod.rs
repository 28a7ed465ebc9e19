//! HTTP API for the recipe search service
//!
//! Uses axum for routing and schemars annotations on the JSON types.

pub mod handlers;
pub mod routing;
pub mod startup;
pub mod types;

use std::sync::Arc;

use crate::config::SearchMode;
use crate::embeddings::EmbeddingProvider;
use crate::store::RecipeStore;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
  pub store: Arc<dyn RecipeStore>,
  pub embeddings: Arc<dyn EmbeddingProvider>,
  pub mode: SearchMode,
}

impl AppState {
  pub fn new(
    store: Arc<dyn RecipeStore>,
    embeddings: Arc<dyn EmbeddingProvider>,
    mode: SearchMode,
  ) -> Self {
    Self { store, embeddings, mode }
  }
}
