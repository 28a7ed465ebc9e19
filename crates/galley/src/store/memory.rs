//! In-memory recipe store

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::fuzzy;
use crate::recipe::{self, Recipe};
use crate::similarity::cosine_similarity;
use crate::store::{RecipeStore, ScoredRecipe, TitleSuggestion};

/// Recipe store backed by process memory
pub struct MemoryStore {
  recipes: RwLock<Vec<Recipe>>,
}

impl MemoryStore {
  /// Create an empty store
  pub fn new() -> Self {
    Self { recipes: RwLock::new(Vec::new()) }
  }

  /// Create a store holding the given recipes
  pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
    Self { recipes: RwLock::new(recipes) }
  }

  /// Create a store pre-loaded with the seed corpus
  pub fn seeded() -> Self {
    Self::with_recipes(recipe::seed_corpus())
  }

  /// Number of stored recipes
  pub async fn len(&self) -> usize {
    self.recipes.read().await.len()
  }

  /// Whether the store holds no recipes
  pub async fn is_empty(&self) -> bool {
    self.recipes.read().await.is_empty()
  }
}

impl Default for MemoryStore {
  fn default() -> Self {
    Self::new()
  }
}

/// Sort scored results descending, breaking ties by title for stable output
fn sort_by_score(results: &mut [ScoredRecipe]) {
  results.sort_by(|a, b| {
    b.score
      .partial_cmp(&a.score)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.recipe.title.cmp(&b.recipe.title))
  });
}

#[async_trait]
impl RecipeStore for MemoryStore {
  async fn list(&self) -> Result<Vec<Recipe>> {
    Ok(self.recipes.read().await.clone())
  }

  async fn suggest_titles(&self, query: &str, limit: usize) -> Result<Vec<TitleSuggestion>> {
    let recipes = self.recipes.read().await;

    let mut scored: Vec<(f32, TitleSuggestion)> = recipes
      .iter()
      .filter_map(|r| {
        let score = fuzzy::title_score(query, &r.title);
        (score > 0.0).then(|| (score, TitleSuggestion { id: r.id, title: r.title.clone() }))
      })
      .collect();

    scored.sort_by(|a, b| {
      b.0
        .partial_cmp(&a.0)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.1.title.cmp(&b.1.title))
    });
    scored.truncate(limit);

    Ok(scored.into_iter().map(|(_, suggestion)| suggestion).collect())
  }

  async fn text_search(&self, query: &str, limit: usize) -> Result<Vec<ScoredRecipe>> {
    let recipes = self.recipes.read().await;

    let mut results: Vec<ScoredRecipe> = recipes
      .iter()
      .filter_map(|r| {
        let content = format!("{} {}", r.title, r.description);
        let score = fuzzy::text_score(query, &content);
        (score > 0.0).then(|| ScoredRecipe { recipe: r.clone(), score })
      })
      .collect();

    sort_by_score(&mut results);
    results.truncate(limit);
    Ok(results)
  }

  async fn vector_search(
    &self,
    vector: &[f32],
    candidates: usize,
    limit: usize,
  ) -> Result<Vec<ScoredRecipe>> {
    let recipes = self.recipes.read().await;

    let mut results: Vec<ScoredRecipe> = recipes
      .iter()
      .filter_map(|r| {
        let embedding = r.embedding.as_ref()?;
        let score = cosine_similarity(vector, embedding);
        Some(ScoredRecipe { recipe: r.clone(), score })
      })
      .collect();

    // Candidate pool first, then the final cut, mirroring the two-stage
    // nearest-neighbor contract.
    sort_by_score(&mut results);
    results.truncate(candidates);
    results.truncate(limit);
    Ok(results)
  }

  async fn set_embedding(&self, id: Uuid, vector: Vec<f32>) -> Result<()> {
    let mut recipes = self.recipes.write().await;
    let recipe = recipes
      .iter_mut()
      .find(|r| r.id == id)
      .ok_or_else(|| anyhow!("recipe {id} not found"))?;

    recipe.embedding = Some(vector);
    recipe.embedding_computed = Some(Utc::now());
    Ok(())
  }
}
