use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted exercise outcome. Written exactly once per exercise session,
/// on the terminal attempt; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseResult {
  pub id: i64,
  pub user_id: i64,
  pub exercise_id: String,
  pub answer: String,
  pub score: i64,
  pub feedback: String,
  pub created_at: DateTime<Utc>,
}
