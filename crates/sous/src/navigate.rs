//! Injected navigation capability
//!
//! URL history updates go through this trait rather than any global router
//! state; the controller takes it as a constructor dependency.

use url::form_urlencoded;

/// The one navigation operation the controller needs
///
/// `replace` updates browsing history in place. Committing a query must
/// never push a new history entry, or every keystroke-commit becomes a
/// back-button stop.
pub trait Navigate: Send + Sync {
  fn replace(&self, url: &str);
}

/// Build the shareable URL for a committed query
///
/// The canonical parameter name is `q`; an empty query yields the bare path.
pub fn query_url(path: &str, query: &str) -> String {
  if query.is_empty() {
    return path.to_string();
  }

  let params: String =
    form_urlencoded::Serializer::new(String::new()).append_pair("q", query).finish();
  format!("{path}?{params}")
}
