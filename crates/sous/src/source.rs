//! Request sources the controller fetches through

use anyhow::Result;
use async_trait::async_trait;

use crate::state::{SearchHit, Suggestion};

/// Supplies autocomplete suggestions for a partial query
#[async_trait]
pub trait SuggestionSource: Send + Sync {
  async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>>;
}

/// Supplies ranked search results for a committed query
///
/// An empty query is valid and returns the unranked default listing.
#[async_trait]
pub trait ResultsSource: Send + Sync {
  async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}
