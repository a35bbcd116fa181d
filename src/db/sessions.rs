//! Identity provider tables (users, sessions).
//!
//! The provider issues sessions out-of-band; this service only resolves a
//! session token to a user, honoring expiry. The insert functions exist for
//! the provider side of the contract and for tests.

use chrono::{Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

pub fn insert_user(conn: &Connection, username: &str) -> Result<i64> {
  conn.execute(
    "INSERT INTO users (username, created_at) VALUES (?1, ?2)",
    params![username, Utc::now().to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn insert_session(
  conn: &Connection,
  session_id: &str,
  user_id: i64,
  duration_hours: i64,
) -> Result<()> {
  let now = Utc::now();
  let expires_at = now + Duration::hours(duration_hours);
  conn.execute(
    "INSERT INTO sessions (id, user_id, created_at, expires_at) VALUES (?1, ?2, ?3, ?4)",
    params![
      session_id,
      user_id,
      now.to_rfc3339(),
      expires_at.to_rfc3339(),
    ],
  )?;
  Ok(())
}

/// Resolve a session token to (user_id, username), None when the token is
/// unknown or expired.
pub fn get_session_user(conn: &Connection, session_id: &str) -> Result<Option<(i64, String)>> {
  conn
    .query_row(
      r#"
      SELECT u.id, u.username
      FROM sessions s
      JOIN users u ON u.id = s.user_id
      WHERE s.id = ?1 AND s.expires_at > ?2
      "#,
      params![session_id, Utc::now().to_rfc3339()],
      |row| Ok((row.get(0)?, row.get(1)?)),
    )
    .optional()
}
