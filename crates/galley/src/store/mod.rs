//! Recipe store abstraction
//!
//! The document store is an external collaborator: every call either
//! succeeds with a result set or fails. Its internal indexing and ranking
//! execution is out of scope for callers.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::recipe::Recipe;

pub use memory::MemoryStore;

/// An `{id, title}` pair returned by title autocomplete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSuggestion {
  pub id: Uuid,
  pub title: String,
}

/// A recipe paired with its relevance score for one query
#[derive(Debug, Clone)]
pub struct ScoredRecipe {
  pub recipe: Recipe,
  pub score: f32,
}

/// Store operations used by the endpoints and the backfill job
#[async_trait]
pub trait RecipeStore: Send + Sync {
  /// List all recipes in insertion order
  async fn list(&self) -> Result<Vec<Recipe>>;

  /// Rank titles against a partial query, best first
  async fn suggest_titles(&self, query: &str, limit: usize) -> Result<Vec<TitleSuggestion>>;

  /// Fuzzy full-text search over title and description, best first
  async fn text_search(&self, query: &str, limit: usize) -> Result<Vec<ScoredRecipe>>;

  /// Nearest-neighbor search over stored embeddings
  ///
  /// Gathers up to `candidates` similar recipes, then returns the top
  /// `limit` of them by descending similarity.
  async fn vector_search(
    &self,
    vector: &[f32],
    candidates: usize,
    limit: usize,
  ) -> Result<Vec<ScoredRecipe>>;

  /// Attach an embedding to a stored recipe
  async fn set_embedding(&self, id: Uuid, vector: Vec<f32>) -> Result<()>;
}
