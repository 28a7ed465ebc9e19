//! The search query controller
//!
//! Translates raw keystrokes into two independent request streams
//! (autocomplete and full search) while keeping the state race-free and the
//! shareable URL in sync with the committed query.
//!
//! Every event handler is a discrete state transition; nothing blocks. The
//! debounce timer is a cancellable spawned task rescheduled per keystroke,
//! and each suggestion fetch carries a sequence number captured at dispatch
//! so a superseded response can never overwrite fresher suggestions.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::navigate::{self, Navigate};
use crate::source::{ResultsSource, SuggestionSource};
use crate::state::{PanelState, QueryState, ResultsState};

/// Quiet period before a keystroke becomes a debounced value
pub const DEBOUNCE: Duration = Duration::from_millis(300);

/// Queries shorter than this never hit the network
pub const MIN_QUERY_LEN: usize = 2;

/// Owns the query state and reacts to UI events
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SearchController {
  state: Arc<Mutex<QueryState>>,
  suggestions: Arc<dyn SuggestionSource>,
  results: Arc<dyn ResultsSource>,
  navigate: Arc<dyn Navigate>,
  base_path: String,
  debounce: Duration,
  fetch_seq: Arc<AtomicU64>,
  results_seq: Arc<AtomicU64>,
  debounce_task: Arc<Mutex<Option<JoinHandle<()>>>>,
  search_in_flight: Arc<AtomicBool>,
}

impl SearchController {
  pub fn new(
    suggestions: Arc<dyn SuggestionSource>,
    results: Arc<dyn ResultsSource>,
    navigate: Arc<dyn Navigate>,
  ) -> Self {
    Self {
      state: Arc::new(Mutex::new(QueryState::default())),
      suggestions,
      results,
      navigate,
      base_path: "/".to_string(),
      debounce: DEBOUNCE,
      fetch_seq: Arc::new(AtomicU64::new(0)),
      results_seq: Arc::new(AtomicU64::new(0)),
      debounce_task: Arc::new(Mutex::new(None)),
      search_in_flight: Arc::new(AtomicBool::new(false)),
    }
  }

  /// Override the debounce quiet period
  pub fn with_debounce(mut self, debounce: Duration) -> Self {
    self.debounce = debounce;
    self
  }

  /// Override the path the query parameter is appended to
  pub fn with_base_path(mut self, path: &str) -> Self {
    self.base_path = path.to_string();
    self
  }

  /// Current state, for rendering
  pub fn snapshot(&self) -> QueryState {
    self.lock_state().clone()
  }

  /// Current suggestion panel state, for rendering
  pub fn panel(&self) -> PanelState {
    self.lock_state().panel()
  }

  /// A keystroke changed the input
  ///
  /// The input value updates synchronously so typing stays responsive; the
  /// autocomplete fetch waits for the debounce.
  pub fn on_input(&self, text: &str) {
    {
      let mut state = self.lock_state();
      state.input_value = text.to_string();
      state.show_suggestions = true;
    }
    self.schedule_debounce(text.to_string());
  }

  /// The input gained focus
  pub fn on_focus(&self) {
    let mut state = self.lock_state();
    if state.input_value.chars().count() >= MIN_QUERY_LEN {
      state.show_suggestions = true;
    }
  }

  /// The user picked a suggestion
  pub fn on_select(&self, title: &str) {
    {
      let mut state = self.lock_state();
      state.input_value = title.to_string();
    }
    self.commit(title.to_string());
  }

  /// The form was submitted explicitly
  pub fn on_submit(&self) {
    let query = self.lock_state().input_value.clone();
    self.commit(query);
  }

  /// The clear button was pressed: one atomic reset of everything
  ///
  /// Clearing also invalidates any search still in flight, so a slow
  /// response for the old query can never resurface under the cleared URL.
  pub fn on_clear(&self) {
    self.cancel_pending_suggestions();
    self.results_seq.fetch_add(1, Ordering::SeqCst);
    {
      let mut state = self.lock_state();
      state.input_value.clear();
      state.debounced_value.clear();
      state.suggestions.clear();
      state.is_loading = false;
      state.show_suggestions = false;
      state.committed = None;
      state.results = ResultsState::Idle;
    }
    self.navigate.replace(&navigate::query_url(&self.base_path, ""));
  }

  /// A click landed outside the control's bounding region
  pub fn on_outside_click(&self) {
    self.lock_state().show_suggestions = false;
  }

  fn lock_state(&self) -> MutexGuard<'_, QueryState> {
    // Recover the inner state if a panicking task poisoned the lock
    self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
  }

  /// Reschedule the debounce timer around the latest keystroke
  fn schedule_debounce(&self, value: String) {
    let controller = self.clone();
    let handle = tokio::spawn(async move {
      tokio::time::sleep(controller.debounce).await;
      controller.apply_debounced(value);
    });

    let mut slot = self.debounce_task.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(previous) = slot.replace(handle) {
      previous.abort();
    }
  }

  /// The debounce quiet period elapsed for `value`
  fn apply_debounced(&self, value: String) {
    {
      let mut state = self.lock_state();
      // Only transitions of the debounced value trigger a fetch
      if state.debounced_value == value {
        return;
      }
      state.debounced_value = value.clone();

      if value.chars().count() < MIN_QUERY_LEN {
        state.suggestions.clear();
        state.is_loading = false;
        return;
      }
      state.is_loading = true;
    }

    let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
    let controller = self.clone();
    tokio::spawn(async move {
      let outcome = controller.suggestions.suggest(&value).await;

      let mut state = controller.lock_state();
      if controller.fetch_seq.load(Ordering::SeqCst) != seq {
        // Superseded while in flight; a fresher fetch owns the state now
        return;
      }
      state.is_loading = false;
      match outcome {
        Ok(items) => state.suggestions = items,
        Err(e) => {
          // Swallowed: an empty list is all the user ever sees
          warn!(error = %e, "autocomplete fetch failed");
          state.suggestions.clear();
        }
      }
    });
  }

  /// Commit `query` as the search: sync the URL, hide the panel, fetch
  fn commit(&self, query: String) {
    self.cancel_pending_suggestions();
    {
      let mut state = self.lock_state();
      state.show_suggestions = false;
      state.committed = (!query.is_empty()).then(|| query.clone());
    }
    self.navigate.replace(&navigate::query_url(&self.base_path, &query));
    self.fetch_results(query);
  }

  /// Abort the debounce timer and invalidate any in-flight suggestion fetch
  fn cancel_pending_suggestions(&self) {
    {
      let mut slot = self.debounce_task.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
      if let Some(handle) = slot.take() {
        handle.abort();
      }
    }
    self.fetch_seq.fetch_add(1, Ordering::SeqCst);
    // The invalidated fetch returns without touching the flag, so close the
    // loading window here or the panel stays in Loading with nothing in flight
    self.lock_state().is_loading = false;
  }

  /// Fetch the results list for a committed query
  ///
  /// Submissions are deliberate and infrequent, so overlap is serialized by
  /// ignoring re-submission while one is in flight rather than cancelling.
  fn fetch_results(&self, query: String) {
    if self.search_in_flight.swap(true, Ordering::SeqCst) {
      debug!("search already in flight, ignoring submission");
      return;
    }
    self.lock_state().results = ResultsState::Loading;

    let seq = self.results_seq.fetch_add(1, Ordering::SeqCst) + 1;
    let controller = self.clone();
    tokio::spawn(async move {
      let outcome = controller.results.search(&query).await;
      {
        let mut state = controller.lock_state();
        // A clear issued mid-flight wins over whatever this fetch brought back
        if controller.results_seq.load(Ordering::SeqCst) == seq {
          state.results = match outcome {
            Ok(hits) if hits.is_empty() && !query.is_empty() => ResultsState::NoMatches,
            Ok(hits) => ResultsState::Loaded(hits),
            Err(e) => {
              warn!(error = %e, "search fetch failed");
              ResultsState::Failed
            }
          };
        }
      }
      controller.search_in_flight.store(false, Ordering::SeqCst);
    });
  }
}
