//! HTTP surface: router assembly and the JSON handlers.

pub mod dashboard;
pub mod exercises;

use axum::{
  routing::{get, post},
  Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::state::AppState;

pub use dashboard::dashboard;
pub use exercises::{get_exercise, start_exercise, submit_answer, try_again};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthOut {
  pub ok: bool,
}

pub async fn health() -> Json<HealthOut> {
  Json(HealthOut { ok: true })
}

/// Build the application router:
/// - REST API under `/api/v1/...`
/// - CORS open to any origin (the SPA is served separately)
/// - per-request HTTP tracing spans
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/v1/health", get(health))
    .route("/api/v1/exercises/start", post(exercises::start_exercise))
    .route("/api/v1/exercises/submit", post(exercises::submit_answer))
    .route("/api/v1/exercises/try-again", post(exercises::try_again))
    .route("/api/v1/exercises/{id}", get(exercises::get_exercise))
    .route("/api/v1/dashboard", get(dashboard::dashboard))
    .with_state(state)
    .layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
    .layer(TraceLayer::new_for_http())
}
