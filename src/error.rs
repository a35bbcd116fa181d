//! API error surface.
//!
//! Every failure is scoped to a single request and mapped onto an HTTP
//! status with a JSON message body; nothing is retried automatically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::db::DbLockError;
use crate::training::AttemptError;

#[derive(Debug)]
pub enum ApiError {
  /// Missing or malformed submission fields
  Validation(String),
  /// Missing or expired identity session
  Unauthorized(String),
  /// Unknown entity, or an empty filtered selection
  NotFound(String),
  /// Attempt state machine violation (locked session, premature retry)
  Conflict(String),
  /// Store/collaborator failure
  Unavailable(String),
}

impl ApiError {
  pub fn validation(message: impl Into<String>) -> Self {
    ApiError::Validation(message.into())
  }

  pub fn unauthorized(message: impl Into<String>) -> Self {
    ApiError::Unauthorized(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    ApiError::NotFound(message.into())
  }

  pub fn conflict(message: impl Into<String>) -> Self {
    ApiError::Conflict(message.into())
  }

  pub fn unavailable(message: impl Into<String>) -> Self {
    ApiError::Unavailable(message.into())
  }
}

#[derive(Serialize)]
struct ErrorBody {
  error: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
      ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
      ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
      ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
      ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
    };

    (status, Json(ErrorBody { error: message })).into_response()
  }
}

impl From<DbLockError> for ApiError {
  fn from(err: DbLockError) -> Self {
    ApiError::Unavailable(err.to_string())
  }
}

impl From<rusqlite::Error> for ApiError {
  fn from(err: rusqlite::Error) -> Self {
    tracing::error!("Store operation failed: {}", err);
    ApiError::Unavailable("Erro ao acessar os dados. Tente novamente.".to_string())
  }
}

impl From<AttemptError> for ApiError {
  fn from(err: AttemptError) -> Self {
    match err {
      AttemptError::Locked => ApiError::Conflict(
        "Limite de tentativas atingido. Volte ao dashboard para tentar outro exercício."
          .to_string(),
      ),
      AttemptError::NoRetriesLeft => ApiError::Conflict(
        "Não há mais tentativas para este exercício.".to_string(),
      ),
      AttemptError::NothingToRetry => ApiError::Conflict(
        "Envie uma resposta antes de tentar novamente.".to_string(),
      ),
    }
  }
}
