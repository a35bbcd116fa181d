//! Exercise flow handlers: start (select + create attempt session),
//! submit an answer, try again, and direct lookup.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AuthContext;
use crate::db::{self, catalog, profiles, results, LogOnError};
use crate::domain::{Exercise, ExerciseFilter};
use crate::error::ApiError;
use crate::session;
use crate::state::AppState;
use crate::training::{apply_score, pick_exercise, AttemptSession};

/// What the learner sees while working on an exercise. The reference
/// answer stays server-side.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseView {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: String,
  pub level: String,
  pub prompt: String,
  pub tags: Vec<String>,
}

impl ExerciseView {
  fn from_exercise(exercise: &Exercise) -> Self {
    Self {
      id: exercise.id.clone(),
      kind: exercise.kind.clone(),
      level: exercise.level.clone(),
      prompt: exercise.prompt.clone(),
      tags: exercise.tags.clone(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartResponse {
  pub session_id: String,
  pub exercise: ExerciseView,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
  pub session_id: String,
  pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProgressionOut {
  pub experience: i64,
  pub level: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
  pub attempt: u8,
  pub score: u8,
  pub feedback: String,
  /// True once the third attempt was scored; the session is locked.
  pub terminal: bool,
  /// Updated progression; absent on non-terminal attempts and when the
  /// terminal write-back failed.
  pub progression: Option<ProgressionOut>,
}

#[derive(Debug, Deserialize)]
pub struct TryAgainRequest {
  pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TryAgainResponse {
  pub attempt: u8,
}

/// POST /api/v1/exercises/start
///
/// Select a random exercise matching the (optional) filter and open an
/// attempt session for it.
pub async fn start_exercise(
  State(state): State<AppState>,
  _auth: AuthContext,
  Json(filter): Json<ExerciseFilter>,
) -> Result<Json<StartResponse>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  let candidates = catalog::list_exercises(&conn, &filter)?;
  drop(conn);

  let mut rng = rand::rng();
  let exercise = pick_exercise(&candidates, &mut rng).ok_or_else(|| {
    ApiError::not_found("Nenhum exercício encontrado para os filtros selecionados.")
  })?;

  let session_id = session::create_session(AttemptSession::new(&exercise.id));
  tracing::debug!(
    "Started exercise {} (session {})",
    exercise.id,
    session_id
  );

  Ok(Json(StartResponse {
    session_id,
    exercise: ExerciseView::from_exercise(exercise),
  }))
}

/// POST /api/v1/exercises/submit
///
/// Score the answer for the session's current attempt. The third attempt
/// persists the result and, if that write succeeded, applies progression.
pub async fn submit_answer(
  State(state): State<AppState>,
  auth: AuthContext,
  Json(body): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
  if body.answer.trim().is_empty() {
    return Err(ApiError::validation("Digite sua resposta antes de enviar."));
  }

  let mut attempt_session = session::get_session(&body.session_id)
    .ok_or_else(|| ApiError::not_found("Sessão de exercício não encontrada."))?;

  let conn = db::try_lock(&state.db)?;
  let exercise = catalog::get_exercise_by_id(&conn, attempt_session.exercise_id())?
    .ok_or_else(|| ApiError::not_found("Exercício não encontrado."))?;

  let submission = attempt_session.submit(&body.answer, &exercise.reference_answer)?;
  session::update_session(&body.session_id, attempt_session);

  let mut progression = None;
  if submission.terminal {
    // Result first, progression only after the result write succeeded.
    // Neither failure rolls back the feedback the learner already has.
    let persisted = results::insert_result(
      &conn,
      auth.user_id,
      &exercise.id,
      &body.answer,
      submission.score,
      &submission.feedback,
    )
    .log_warn("Failed to persist exercise result");

    if persisted.is_some() {
      progression = profiles::get_profile(&conn, auth.user_id)
        .log_warn("Failed to load profile for progression")
        .flatten()
        .and_then(|profile| {
          let next = apply_score(profile.experience, submission.score);
          profiles::set_experience_and_level(&conn, auth.user_id, next.experience, next.level)
            .log_warn("Failed to write progression")
            .map(|_| ProgressionOut {
              experience: next.experience,
              level: next.level,
            })
        });
    }
  }

  Ok(Json(SubmitResponse {
    attempt: submission.attempt,
    score: submission.score,
    feedback: submission.feedback,
    terminal: submission.terminal,
    progression,
  }))
}

/// POST /api/v1/exercises/try-again
pub async fn try_again(
  _auth: AuthContext,
  Json(body): Json<TryAgainRequest>,
) -> Result<Json<TryAgainResponse>, ApiError> {
  let mut attempt_session = session::get_session(&body.session_id)
    .ok_or_else(|| ApiError::not_found("Sessão de exercício não encontrada."))?;

  let attempt = attempt_session.try_again()?;
  session::update_session(&body.session_id, attempt_session);

  Ok(Json(TryAgainResponse { attempt }))
}

/// GET /api/v1/exercises/{id}
pub async fn get_exercise(
  State(state): State<AppState>,
  _auth: AuthContext,
  Path(id): Path<String>,
) -> Result<Json<Exercise>, ApiError> {
  let conn = db::try_lock(&state.db)?;
  let exercise = catalog::get_exercise_by_id(&conn, &id)?
    .ok_or_else(|| ApiError::not_found("Exercício não encontrado."))?;
  Ok(Json(exercise))
}
