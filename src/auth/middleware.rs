//! Authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::db::{self, sessions};
use crate::error::ApiError;
use crate::state::AppState;

pub const SESSION_COOKIE_NAME: &str = "hispano_session";

/// Authenticated request context.
/// Add this as a handler parameter to require a valid identity session.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
}

fn unauthorized() -> Response {
    ApiError::unauthorized("Faça login para continuar.").into_response()
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract cookies
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| unauthorized())?;

        // Get session cookie
        let session_id = jar
            .get(SESSION_COOKIE_NAME)
            .map(|c| c.value().to_string())
            .ok_or_else(unauthorized)?;

        // Validate against the provider's session table
        let conn = db::try_lock(&state.db).map_err(|e| ApiError::from(e).into_response())?;

        let (user_id, username) = sessions::get_session_user(&conn, &session_id)
            .map_err(|e| ApiError::from(e).into_response())?
            .ok_or_else(unauthorized)?;

        Ok(AuthContext { user_id, username })
    }
}
