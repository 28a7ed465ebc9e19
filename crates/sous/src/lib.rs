//! Sous - Search Query Controller
//!
//! Client-side plumbing for an incremental recipe search box: debounced
//! keystrokes, race-safe autocomplete fetching, a suggestion-panel state
//! machine, and URL synchronization through an injected navigation
//! capability.

pub mod controller;
pub mod http;
pub mod navigate;
pub mod source;
pub mod state;

pub use controller::SearchController;
pub use navigate::Navigate;
pub use source::{ResultsSource, SuggestionSource};
pub use state::{PanelState, QueryState, ResultsState, SearchHit, Suggestion};
