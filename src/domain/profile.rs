use serde::{Deserialize, Serialize};

/// A user's progression profile.
///
/// The identity provider owns the user row itself; only `experience` and
/// `level` are written by this service, and always together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
  pub user_id: i64,
  pub username: String,
  pub experience: i64,
  pub level: i64,
}
