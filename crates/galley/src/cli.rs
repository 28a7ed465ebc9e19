//! CLI command implementations

use anyhow::Result;
use colored::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::backfill::{self, BackfillOptions};
use crate::config::{EmbeddingsConfig, SearchMode, ServerConfig};
use crate::embeddings::{EmbeddingProvider, FakeEmbeddings, RemoteEmbeddings};
use crate::recipe;
use crate::server::{startup, AppState};
use crate::store::{MemoryStore, RecipeStore};

fn build_provider(config: EmbeddingsConfig, offline: bool) -> Arc<dyn EmbeddingProvider> {
  if offline {
    Arc::new(FakeEmbeddings::default())
  } else {
    Arc::new(RemoteEmbeddings::new(config))
  }
}

/// Start the HTTP server over a seeded in-memory store
///
/// Vector mode backfills embeddings at startup so similarity search has
/// vectors to rank against.
pub async fn serve(config: ServerConfig, embeddings: EmbeddingsConfig, offline: bool) -> Result<()> {
  let store: Arc<dyn RecipeStore> = Arc::new(MemoryStore::seeded());
  let provider = build_provider(embeddings, offline);

  if config.mode == SearchMode::Vector {
    info!("vector mode: backfilling embeddings before serving");
    let report = backfill::run(store.as_ref(), provider.as_ref(), &BackfillOptions::default()).await?;
    info!(embedded = report.embedded, failed = report.failed, "startup backfill done");
  }

  startup::start_server(config.bind, AppState::new(store, provider, config.mode)).await
}

/// Run the embedding backfill job once and print a report
pub async fn embed(
  embeddings: EmbeddingsConfig,
  batch_size: usize,
  delay_ms: u64,
  offline: bool,
) -> Result<()> {
  let store = MemoryStore::seeded();
  let provider = build_provider(embeddings, offline);
  let options =
    BackfillOptions { batch_size, batch_delay: Duration::from_millis(delay_ms) };

  let report = backfill::run(&store, provider.as_ref(), &options).await?;

  println!(
    "{} {} embedded, {} failed, {} batches",
    "Backfill complete:".green().bold(),
    report.embedded,
    report.failed,
    report.batches
  );
  Ok(())
}

/// One-shot fuzzy text search against the seed corpus
pub async fn search(terms: &[String]) -> Result<()> {
  let store = MemoryStore::seeded();
  let query = terms.join(" ");
  let results = store.text_search(&query, crate::server::types::MAX_RESULTS).await?;

  if results.is_empty() {
    println!("No recipes found for: {}", query.yellow());
    return Ok(());
  }

  for result in results {
    println!(
      "{} {}",
      format!("[{:.2}]", result.score).cyan(),
      result.recipe.title.bold()
    );
    println!("       {}", result.recipe.description);
  }
  Ok(())
}

/// One-shot title autocomplete against the seed corpus
pub async fn suggest(prefix: &str) -> Result<()> {
  let store = MemoryStore::seeded();
  let suggestions =
    store.suggest_titles(prefix, crate::server::types::MAX_SUGGESTIONS).await?;

  if suggestions.is_empty() {
    println!("No suggestions for: {}", prefix.yellow());
    return Ok(());
  }

  for suggestion in suggestions {
    println!("{}", suggestion.title);
  }
  Ok(())
}

/// Print the seed corpus that `serve` loads at startup
pub fn seed() -> Result<()> {
  let corpus = recipe::seed_corpus();
  for recipe in &corpus {
    println!("{}", recipe.title.bold());
  }
  println!("\n{} {} recipes", "Seed corpus:".green().bold(), corpus.len());
  Ok(())
}
