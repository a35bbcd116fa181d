//! Uniform random exercise selection.
//!
//! The RNG is injected so selection can be made deterministic in tests;
//! the HTTP layer passes the ambient thread RNG.

use rand::Rng;

use crate::domain::Exercise;

/// Pick one exercise uniformly at random from the candidate set.
/// Returns None when the set is empty (the "no exercise matches" signal,
/// distinct from a lookup failure).
pub fn pick_exercise<'a, R: Rng>(candidates: &'a [Exercise], rng: &mut R) -> Option<&'a Exercise> {
  if candidates.is_empty() {
    None
  } else {
    Some(&candidates[rng.random_range(0..candidates.len())])
  }
}
