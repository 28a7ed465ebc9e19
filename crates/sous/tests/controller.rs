use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sous::{
  Navigate, PanelState, QueryState, ResultsSource, ResultsState, SearchController, SearchHit,
  Suggestion, SuggestionSource,
};

fn suggestion(title: &str) -> Suggestion {
  Suggestion { id: title.to_string(), title: title.to_string() }
}

fn hit(title: &str, score: f32) -> SearchHit {
  SearchHit { title: title.to_string(), description: format!("About {title}."), score }
}

/// Navigator that records every `replace` call
#[derive(Default)]
struct RecordingNav {
  urls: Mutex<Vec<String>>,
}

impl RecordingNav {
  fn last(&self) -> Option<String> {
    self.urls.lock().unwrap().last().cloned()
  }

  fn count(&self) -> usize {
    self.urls.lock().unwrap().len()
  }
}

impl Navigate for RecordingNav {
  fn replace(&self, url: &str) {
    self.urls.lock().unwrap().push(url.to_string());
  }
}

/// Per-query scripted responses with programmable latency
///
/// Unscripted queries resolve immediately with no suggestions; a script of
/// `None` fails the fetch.
#[derive(Default)]
struct ScriptedSuggestions {
  scripts: Mutex<HashMap<String, (Duration, Option<Vec<Suggestion>>)>>,
  calls: Mutex<Vec<String>>,
}

impl ScriptedSuggestions {
  fn script(&self, query: &str, delay: Duration, outcome: Option<Vec<Suggestion>>) {
    self.scripts.lock().unwrap().insert(query.to_string(), (delay, outcome));
  }

  fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl SuggestionSource for ScriptedSuggestions {
  async fn suggest(&self, query: &str) -> Result<Vec<Suggestion>> {
    self.calls.lock().unwrap().push(query.to_string());
    let script = self.scripts.lock().unwrap().get(query).cloned();
    match script {
      Some((delay, outcome)) => {
        tokio::time::sleep(delay).await;
        match outcome {
          Some(items) => Ok(items),
          None => bail!("scripted autocomplete failure"),
        }
      }
      None => Ok(Vec::new()),
    }
  }
}

/// Results source returning a fixed list, with optional latency or failure
#[derive(Default)]
struct ScriptedResults {
  hits: Vec<SearchHit>,
  delay: Duration,
  fail: bool,
  calls: Mutex<Vec<String>>,
}

impl ScriptedResults {
  fn fixed(hits: Vec<SearchHit>) -> Self {
    Self { hits, ..Default::default() }
  }

  fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }
}

#[async_trait]
impl ResultsSource for ScriptedResults {
  async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
    self.calls.lock().unwrap().push(query.to_string());
    tokio::time::sleep(self.delay).await;
    if self.fail {
      bail!("scripted search failure");
    }
    Ok(self.hits.clone())
  }
}

struct Harness {
  controller: SearchController,
  suggestions: Arc<ScriptedSuggestions>,
  results: Arc<ScriptedResults>,
  nav: Arc<RecordingNav>,
}

fn harness_with_results(results: ScriptedResults) -> Harness {
  let suggestions = Arc::new(ScriptedSuggestions::default());
  let results = Arc::new(results);
  let nav = Arc::new(RecordingNav::default());
  let controller =
    SearchController::new(suggestions.clone(), results.clone(), nav.clone());
  Harness { controller, suggestions, results, nav }
}

fn harness() -> Harness {
  harness_with_results(ScriptedResults::fixed(vec![hit("Alpine Melt Burger", 1.0)]))
}

async fn settle() {
  // Past the debounce window plus any zero-delay fetch
  tokio::time::sleep(Duration::from_millis(400)).await;
}

fn state_of(h: &Harness) -> QueryState {
  h.controller.snapshot()
}

// Debounce and minimum length
// ===========================

#[tokio::test(start_paused = true)]
async fn test_short_query_never_hits_the_network() {
  let h = harness();

  h.controller.on_input("f");
  settle().await;

  let state = state_of(&h);
  assert!(h.suggestions.calls().is_empty());
  assert!(state.suggestions.is_empty());
  assert_eq!(state.debounced_value, "f");
}

#[tokio::test(start_paused = true)]
async fn test_input_updates_synchronously_before_debounce() {
  let h = harness();

  h.controller.on_input("fire");

  let state = state_of(&h);
  assert_eq!(state.input_value, "fire");
  assert!(state.show_suggestions);
  assert_eq!(state.debounced_value, "");
}

#[tokio::test(start_paused = true)]
async fn test_each_keystroke_resets_the_debounce_timer() {
  let h = harness();
  h.suggestions.script("fir", Duration::ZERO, Some(vec![suggestion("Firecracker Chicken Bites")]));

  h.controller.on_input("fi");
  tokio::time::sleep(Duration::from_millis(200)).await;
  assert!(h.suggestions.calls().is_empty());

  h.controller.on_input("fir");
  tokio::time::sleep(Duration::from_millis(200)).await;
  // The "fi" timer was cancelled and "fir" has only waited 200ms
  assert!(h.suggestions.calls().is_empty());

  tokio::time::sleep(Duration::from_millis(150)).await;
  assert_eq!(h.suggestions.calls(), vec!["fir"]);
}

#[tokio::test(start_paused = true)]
async fn test_unchanged_debounced_value_does_not_refetch() {
  let h = harness();
  h.suggestions.script("fi", Duration::ZERO, Some(vec![suggestion("Firecracker Chicken Bites")]));

  h.controller.on_input("fi");
  settle().await;
  h.controller.on_input("fir");
  h.controller.on_input("fi");
  settle().await;

  assert_eq!(h.suggestions.calls(), vec!["fi"]);
}

// Fetch outcomes
// ==============

#[tokio::test(start_paused = true)]
async fn test_suggestions_replaced_wholesale() {
  let h = harness();
  h.suggestions.script(
    "ma",
    Duration::ZERO,
    Some(vec![suggestion("Maple Pecan Granola"), suggestion("Spicy Mango Salsa")]),
  );
  h.suggestions.script("map", Duration::ZERO, Some(vec![suggestion("Maple Pecan Granola")]));

  h.controller.on_input("ma");
  settle().await;
  assert_eq!(state_of(&h).suggestions.len(), 2);

  h.controller.on_input("map");
  settle().await;

  let state = state_of(&h);
  assert_eq!(state.suggestions, vec![suggestion("Maple Pecan Granola")]);
  assert!(!state.is_loading);
  assert_eq!(state.panel(), PanelState::Populated);
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_clears_suggestions_silently() {
  let h = harness();
  h.suggestions.script("ocean", Duration::ZERO, Some(vec![suggestion("Ocean Breeze Tacos")]));
  h.suggestions.script("oceans", Duration::ZERO, None);

  h.controller.on_input("ocean");
  settle().await;
  assert_eq!(state_of(&h).panel(), PanelState::Populated);

  h.controller.on_input("oceans");
  settle().await;

  // Failure looks exactly like "no suggestions"
  let state = state_of(&h);
  assert!(state.suggestions.is_empty());
  assert_eq!(state.panel(), PanelState::Empty);
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_tracks_the_in_flight_fetch() {
  let h = harness();
  h.suggestions.script("gar", Duration::from_millis(100), Some(vec![suggestion("Garden Harvest Flatbread")]));

  h.controller.on_input("gar");
  tokio::time::sleep(Duration::from_millis(350)).await;
  assert!(state_of(&h).is_loading);
  assert_eq!(state_of(&h).panel(), PanelState::Loading);

  tokio::time::sleep(Duration::from_millis(100)).await;
  assert!(!state_of(&h).is_loading);
}

// Race safety
// ===========

#[tokio::test(start_paused = true)]
async fn test_stale_response_never_overwrites_fresher_one() {
  let h = harness();
  h.suggestions.script("fir", Duration::from_millis(500), Some(vec![suggestion("Stale")]));
  h.suggestions.script("fire", Duration::from_millis(50), Some(vec![suggestion("Firecracker Chicken Bites")]));

  h.controller.on_input("fir");
  tokio::time::sleep(Duration::from_millis(310)).await;
  // "fir" is now in flight and slow
  h.controller.on_input("fire");
  tokio::time::sleep(Duration::from_millis(310)).await;
  // "fire" resolved first; let the stale "fir" response land afterwards
  tokio::time::sleep(Duration::from_millis(400)).await;

  let state = state_of(&h);
  assert_eq!(h.suggestions.calls(), vec!["fir", "fire"]);
  assert_eq!(state.suggestions, vec![suggestion("Firecracker Chicken Bites")]);
}

#[tokio::test(start_paused = true)]
async fn test_commit_superseding_a_fetch_ends_the_loading_state() {
  let h = harness();
  h.suggestions.script("fire", Duration::from_millis(500), Some(vec![suggestion("Stale")]));

  h.controller.on_input("fire");
  tokio::time::sleep(Duration::from_millis(310)).await;
  assert!(state_of(&h).is_loading);

  // Submitting invalidates the fetch still in flight
  h.controller.on_submit();
  tokio::time::sleep(Duration::from_millis(600)).await;

  // The discarded response must not leave the loading flag set; refocusing
  // the input re-shows the panel and it must not be stuck on Loading
  h.controller.on_focus();
  let state = state_of(&h);
  assert!(!state.is_loading);
  assert!(state.suggestions.is_empty());
  assert_eq!(state.panel(), PanelState::Empty);
}

// Selection, submission, clearing
// ===============================

#[tokio::test(start_paused = true)]
async fn test_selecting_a_suggestion_commits_it_exactly() {
  let h = harness();

  h.controller.on_input("fire");
  h.controller.on_select("Firecracker Chicken Bites");
  settle().await;

  let state = state_of(&h);
  assert_eq!(state.input_value, "Firecracker Chicken Bites");
  assert_eq!(state.committed.as_deref(), Some("Firecracker Chicken Bites"));
  assert_eq!(state.panel(), PanelState::Hidden);
  assert_eq!(h.nav.last().as_deref(), Some("/?q=Firecracker+Chicken+Bites"));
}

#[tokio::test(start_paused = true)]
async fn test_submit_commits_current_input_regardless_of_suggestions() {
  let h = harness();

  h.controller.on_input("mango salsa");
  h.controller.on_submit();
  settle().await;

  let state = state_of(&h);
  assert_eq!(state.committed.as_deref(), Some("mango salsa"));
  assert!(!state.show_suggestions);
  assert_eq!(h.nav.last().as_deref(), Some("/?q=mango+salsa"));
  assert_eq!(h.results.calls(), vec!["mango salsa"]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_resets_everything_and_the_url() {
  let h = harness();
  h.suggestions.script("maple", Duration::ZERO, Some(vec![suggestion("Maple Pecan Granola")]));

  h.controller.on_input("maple");
  settle().await;
  h.controller.on_submit();
  settle().await;

  h.controller.on_clear();
  settle().await;

  let state = state_of(&h);
  assert_eq!(state.input_value, "");
  assert_eq!(state.debounced_value, "");
  assert!(state.suggestions.is_empty());
  assert!(!state.show_suggestions);
  assert!(state.committed.is_none());
  assert_eq!(h.nav.last().as_deref(), Some("/"));
  // Clearing is a full reset, not a refetch
  assert_eq!(state.results, ResultsState::Idle);
  assert_eq!(h.results.calls(), vec!["maple"]);
}

#[tokio::test(start_paused = true)]
async fn test_clear_while_search_in_flight_stays_reset() {
  let h = harness_with_results(ScriptedResults {
    hits: vec![hit("Midnight Truffle Pasta", 0.9)],
    delay: Duration::from_secs(1),
    ..Default::default()
  });

  h.controller.on_input("truffle");
  h.controller.on_submit();
  tokio::time::sleep(Duration::from_millis(10)).await;
  assert_eq!(state_of(&h).results, ResultsState::Loading);

  h.controller.on_clear();
  assert_eq!(state_of(&h).results, ResultsState::Idle);

  // The slow response for the old query lands after the reset
  tokio::time::sleep(Duration::from_millis(1100)).await;
  assert_eq!(state_of(&h).results, ResultsState::Idle);
  assert_eq!(h.nav.last().as_deref(), Some("/"));
}

#[tokio::test(start_paused = true)]
async fn test_outside_click_only_hides_the_panel() {
  let h = harness();
  h.suggestions.script("peach", Duration::ZERO, Some(vec![suggestion("Savannah Peach Cobbler")]));

  h.controller.on_input("peach");
  settle().await;
  h.controller.on_submit();
  settle().await;
  let nav_before = h.nav.count();

  h.controller.on_outside_click();

  let state = state_of(&h);
  assert_eq!(state.panel(), PanelState::Hidden);
  assert_eq!(state.input_value, "peach");
  assert_eq!(state.committed.as_deref(), Some("peach"));
  assert_eq!(h.nav.count(), nav_before);
}

#[tokio::test(start_paused = true)]
async fn test_focus_shows_panel_only_with_sufficient_length() {
  let h = harness();

  h.controller.on_input("p");
  settle().await;
  h.controller.on_outside_click();
  h.controller.on_focus();
  assert_eq!(state_of(&h).panel(), PanelState::Hidden);

  h.controller.on_input("pe");
  settle().await;
  h.controller.on_outside_click();
  h.controller.on_focus();
  assert_ne!(state_of(&h).panel(), PanelState::Hidden);
}

// Results list
// ============

#[tokio::test(start_paused = true)]
async fn test_no_matches_is_distinct_from_failure() {
  let empty = harness_with_results(ScriptedResults::fixed(Vec::new()));
  empty.controller.on_input("zz");
  empty.controller.on_submit();
  settle().await;
  assert_eq!(state_of(&empty).results, ResultsState::NoMatches);

  let failing =
    harness_with_results(ScriptedResults { fail: true, ..Default::default() });
  failing.controller.on_input("zz");
  failing.controller.on_submit();
  settle().await;
  assert_eq!(state_of(&failing).results, ResultsState::Failed);
}

#[tokio::test(start_paused = true)]
async fn test_resubmission_is_serialized_while_in_flight() {
  let h = harness_with_results(ScriptedResults {
    hits: vec![hit("Midnight Truffle Pasta", 0.9)],
    delay: Duration::from_secs(1),
    ..Default::default()
  });

  h.controller.on_input("truffle");
  h.controller.on_submit();
  h.controller.on_submit();
  tokio::time::sleep(Duration::from_millis(10)).await;
  assert_eq!(h.results.calls().len(), 1);

  tokio::time::sleep(Duration::from_millis(1100)).await;
  assert_eq!(state_of(&h).results, ResultsState::Loaded(vec![hit("Midnight Truffle Pasta", 0.9)]));

  h.controller.on_submit();
  settle().await;
  assert_eq!(h.results.calls().len(), 2);
}
