//! Vector similarity for embedding search

/// Cosine similarity between two embeddings, in a single pass
///
/// Mismatched dimensions and zero vectors score 0.0 rather than erroring,
/// so a malformed embedding simply ranks last.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
  if a.len() != b.len() {
    return 0.0;
  }

  let mut dot = 0.0f32;
  let mut norm_a = 0.0f32;
  let mut norm_b = 0.0f32;
  for (x, y) in a.iter().zip(b) {
    dot += x * y;
    norm_a += x * x;
    norm_b += y * y;
  }

  let magnitude = (norm_a * norm_b).sqrt();
  if magnitude == 0.0 {
    0.0
  } else {
    dot / magnitude
  }
}
