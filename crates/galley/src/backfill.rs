//! Batch embedding backfill job
//!
//! Offline maintenance: find recipes without embeddings, embed them in
//! fixed-size batches, and pace the batches with a fixed delay. The delay is
//! backpressure against the provider's rate limit, not a performance knob;
//! do not parallelize across batches without re-deriving that limit.

use anyhow::{Context, Result};
use futures::future::join_all;
use std::time::Duration;
use tracing::{info, warn};

use crate::embeddings::EmbeddingProvider;
use crate::recipe::Recipe;
use crate::store::RecipeStore;

/// Default number of concurrent embedding requests per batch
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Default pause between consecutive batches
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(2);

/// Backfill tuning knobs
#[derive(Clone, Debug)]
pub struct BackfillOptions {
  pub batch_size: usize,
  pub batch_delay: Duration,
}

impl Default for BackfillOptions {
  fn default() -> Self {
    Self { batch_size: DEFAULT_BATCH_SIZE, batch_delay: DEFAULT_BATCH_DELAY }
  }
}

/// Outcome of one backfill run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackfillReport {
  /// Recipes found without an embedding
  pub scanned: usize,
  /// Embeddings successfully computed and stored
  pub embedded: usize,
  /// Recipes that failed and were skipped
  pub failed: usize,
  /// Batches processed
  pub batches: usize,
}

/// Embed every recipe that lacks a vector
///
/// A failure on one recipe is logged and skipped; only a failure to list
/// the recipes at all aborts the run.
pub async fn run(
  store: &dyn RecipeStore,
  provider: &dyn EmbeddingProvider,
  options: &BackfillOptions,
) -> Result<BackfillReport> {
  let recipes = store.list().await.context("failed to list recipes")?;
  let pending: Vec<Recipe> = recipes.into_iter().filter(|r| r.embedding.is_none()).collect();

  let mut report = BackfillReport { scanned: pending.len(), ..Default::default() };
  if pending.is_empty() {
    info!("no recipes need embeddings");
    return Ok(report);
  }

  let total_batches = pending.len().div_ceil(options.batch_size);
  info!(recipes = pending.len(), batches = total_batches, "starting embedding backfill");

  for (index, batch) in pending.chunks(options.batch_size).enumerate() {
    info!(batch = index + 1, total = total_batches, size = batch.len(), "embedding batch");

    let updates = batch.iter().map(|recipe| async move {
      let vector = provider.embed(recipe.embedding_text()).await?;
      store
        .set_embedding(recipe.id, vector)
        .await
        .map_err(|e| crate::embeddings::EmbeddingError::Generation(e.to_string()))?;
      Ok::<(), crate::embeddings::EmbeddingError>(())
    });

    for (recipe, outcome) in batch.iter().zip(join_all(updates).await) {
      match outcome {
        Ok(()) => report.embedded += 1,
        Err(e) => {
          report.failed += 1;
          warn!(recipe = %recipe.title, error = %e, "skipping recipe");
        }
      }
    }
    report.batches += 1;

    // Pace only *between* batches: n batches, n - 1 delays.
    if index + 1 < total_batches {
      tokio::time::sleep(options.batch_delay).await;
    }
  }

  info!(
    embedded = report.embedded,
    failed = report.failed,
    batches = report.batches,
    "backfill complete"
  );
  Ok(report)
}
