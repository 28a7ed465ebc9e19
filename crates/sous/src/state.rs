//! Client-side query state

use serde::Deserialize;

/// One autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Suggestion {
  pub id: String,
  pub title: String,
}

/// One search result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
  pub title: String,
  pub description: String,
  pub score: f32,
}

/// Where the results list currently stands
///
/// `NoMatches` (a successful search that found nothing) is deliberately a
/// different state than `Failed` (the request itself broke); the UI renders
/// them differently.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsState {
  #[default]
  Idle,
  Loading,
  Loaded(Vec<SearchHit>),
  NoMatches,
  Failed,
}

/// Suggestion panel rendering state, derived from [`QueryState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
  Hidden,
  Loading,
  Populated,
  Empty,
}

/// Ephemeral state owned by the search controller
#[derive(Debug, Clone, Default)]
pub struct QueryState {
  /// Raw input, updated synchronously on every keystroke
  pub input_value: String,

  /// Input after the debounce quiet period
  pub debounced_value: String,

  /// Current suggestion list, replaced wholesale on each fetch
  pub suggestions: Vec<Suggestion>,

  /// An autocomplete fetch is in flight
  pub is_loading: bool,

  /// The suggestion panel is visible
  pub show_suggestions: bool,

  /// The committed search query mirrored into the URL, if any
  pub committed: Option<String>,

  /// The results list
  pub results: ResultsState,
}

impl QueryState {
  /// Derive the suggestion panel state
  pub fn panel(&self) -> PanelState {
    if !self.show_suggestions {
      PanelState::Hidden
    } else if self.is_loading {
      PanelState::Loading
    } else if !self.suggestions.is_empty() {
      PanelState::Populated
    } else {
      PanelState::Empty
    }
  }
}
