//! Progress dashboard: profile, result history, aggregates and badges.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::db::{self, profiles, results};
use crate::domain::{ExerciseResult, UserProfile};
use crate::error::ApiError;
use crate::state::AppState;
use crate::training::{evaluate_badges, BadgeStatus};

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardStats {
  pub exercises_completed: i64,
  pub average_score: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
  pub profile: UserProfile,
  pub stats: DashboardStats,
  pub history: Vec<ExerciseResult>,
  pub badges: Vec<BadgeStatus>,
}

/// GET /api/v1/dashboard
pub async fn dashboard(
  State(state): State<AppState>,
  auth: AuthContext,
) -> Result<Json<DashboardResponse>, ApiError> {
  let conn = db::try_lock(&state.db)?;

  let profile = profiles::get_profile(&conn, auth.user_id)?
    .ok_or_else(|| ApiError::not_found("Perfil não encontrado."))?;
  let history = results::history_for_user(&conn, auth.user_id)?;
  let stats = results::history_stats(&conn, auth.user_id)?;
  let badges = evaluate_badges(&history, &profile);

  Ok(Json(DashboardResponse {
    profile,
    stats: DashboardStats {
      exercises_completed: stats.exercises_completed,
      average_score: stats.average_score,
    },
    history,
    badges,
  }))
}
