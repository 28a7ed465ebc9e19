//! Fuzzy text matching for search and autocomplete
//!
//! Query tokens match document tokens within a bounded edit distance (2),
//! with the first character required to match exactly.

/// Maximum number of character edits tolerated per token
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Bounded Levenshtein distance
///
/// Returns `None` when the distance exceeds `max`.
pub fn within_distance(a: &str, b: &str, max: usize) -> Option<usize> {
  let a: Vec<char> = a.chars().collect();
  let b: Vec<char> = b.chars().collect();

  if a.len().abs_diff(b.len()) > max {
    return None;
  }

  let mut previous: Vec<usize> = (0..=b.len()).collect();
  let mut current = vec![0usize; b.len() + 1];

  for (i, ca) in a.iter().enumerate() {
    current[0] = i + 1;
    let mut row_min = current[0];

    for (j, cb) in b.iter().enumerate() {
      let substitution = previous[j] + usize::from(ca != cb);
      current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
      row_min = row_min.min(current[j + 1]);
    }

    if row_min > max {
      return None;
    }
    std::mem::swap(&mut previous, &mut current);
  }

  (previous[b.len()] <= max).then_some(previous[b.len()])
}

/// Split text into lowercase alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .filter(|t| !t.is_empty())
    .map(|t| t.to_lowercase())
    .collect()
}

/// Score one query token against one document token
///
/// Zero unless the first characters match exactly and the tokens are within
/// the edit-distance bound; an exact match scores 1.0.
pub fn token_score(query: &str, token: &str) -> f32 {
  if query.chars().next() != token.chars().next() {
    return 0.0;
  }

  match within_distance(query, token, MAX_EDIT_DISTANCE) {
    Some(distance) => {
      let span = query.chars().count().max(token.chars().count());
      if span == 0 {
        0.0
      } else {
        1.0 - distance as f32 / span as f32
      }
    }
    None => 0.0,
  }
}

/// Relevance of free text against a query: best fuzzy match per query token,
/// summed over all query tokens
pub fn text_score(query: &str, content: &str) -> f32 {
  let query_tokens = tokenize(query);
  let content_tokens = tokenize(content);

  query_tokens
    .iter()
    .map(|q| {
      content_tokens.iter().map(|t| token_score(q, t)).fold(0.0f32, f32::max)
    })
    .sum()
}

/// Autocomplete relevance of a title against a partial query
///
/// Prefix matches outrank fuzzy matches so that in-progress words still
/// surface the titles the user is typing toward.
pub fn title_score(query: &str, title: &str) -> f32 {
  let query_tokens = tokenize(query);
  let title_tokens = tokenize(title);

  if query_tokens.is_empty() {
    return 0.0;
  }

  query_tokens
    .iter()
    .map(|q| {
      title_tokens
        .iter()
        .map(|t| {
          if t == q {
            1.0
          } else if t.starts_with(q.as_str()) {
            0.5 + 0.5 * (q.chars().count() as f32 / t.chars().count() as f32)
          } else {
            0.5 * token_score(q, t)
          }
        })
        .fold(0.0f32, f32::max)
    })
    .sum()
}
