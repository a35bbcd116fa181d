//! Lexical similarity scoring between a submitted answer and the reference
//! translation.
//!
//! The score is the Sørensen–Dice coefficient over character bigrams,
//! computed after stripping all whitespace: identical strings score 100,
//! strings sharing no bigram score 0. Comparison is case-sensitive; the
//! missing-word feedback below is the case-insensitive part.

use std::collections::HashMap;

/// Percentage similarity in [0, 100] between a candidate and a reference.
///
/// Empty input on either side scores 0. Identical strings (ignoring
/// whitespace) score 100, including single-character ones.
pub fn similarity_score(candidate: &str, reference: &str) -> u8 {
  if candidate.is_empty() || reference.is_empty() {
    return 0;
  }

  let a: Vec<char> = candidate.chars().filter(|c| !c.is_whitespace()).collect();
  let b: Vec<char> = reference.chars().filter(|c| !c.is_whitespace()).collect();

  if a == b {
    return 100;
  }
  if a.len() < 2 || b.len() < 2 {
    return 0;
  }

  // Bigram multiset of the candidate; duplicates count.
  let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
  for pair in a.windows(2) {
    *bigrams.entry((pair[0], pair[1])).or_insert(0) += 1;
  }

  let mut intersection = 0usize;
  for pair in b.windows(2) {
    if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
      if *count > 0 {
        *count -= 1;
        intersection += 1;
      }
    }
  }

  let total = (a.len() - 1) + (b.len() - 1);
  let ratio = (2 * intersection) as f64 / total as f64;
  (ratio * 100.0).round() as u8
}

/// Reference words absent from the user's answer.
///
/// Both sides are lower-cased and whitespace-tokenized; duplicates in the
/// reference are kept and reference order is preserved.
pub fn missing_words(answer: &str, reference: &str) -> Vec<String> {
  let user_words: Vec<String> = answer
    .to_lowercase()
    .split_whitespace()
    .map(|w| w.to_string())
    .collect();

  reference
    .to_lowercase()
    .split_whitespace()
    .filter(|w| !user_words.iter().any(|u| u == w))
    .map(|w| w.to_string())
    .collect()
}
