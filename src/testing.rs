//! Test utilities for database setup.
//!
//! Provides a temp-directory-backed database initialized through the
//! authoritative schema, plus identity-session helpers so handler tests
//! can act as a logged-in user.

use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};
use tempfile::TempDir;

use crate::db::{self, DbPool};
use crate::session::generate_session_id;
use crate::state::AppState;

/// Test environment with a real SQLite database using the authoritative
/// schema. The temp directory is kept alive for the database file and
/// cleaned up on drop.
pub struct TestEnv {
    pub temp: TempDir,
    pub pool: DbPool,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let db_path = temp.path().join("hispano.db");
        let conn = Connection::open(&db_path)?;
        db::run_migrations(&conn)?;

        Ok(Self {
            temp,
            pool: Arc::new(Mutex::new(conn)),
        })
    }

    /// Application state sharing this environment's database.
    pub fn state(&self) -> AppState {
        AppState::new(self.pool.clone())
    }

    /// Direct connection access for test setup and assertions.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.pool.lock().expect("test database lock poisoned")
    }

    /// Create a user with a valid identity session (as the external
    /// provider would) and seed the exercise catalog. Returns the session
    /// token to send as the session cookie.
    pub fn login_user(&self, username: &str) -> String {
        let conn = self.conn();
        db::seed_exercises(&conn).expect("failed to seed exercises");
        let user_id = db::sessions::insert_user(&conn, username).expect("failed to insert user");
        let token = generate_session_id();
        db::sessions::insert_session(&conn, &token, user_id, 24)
            .expect("failed to insert session");
        token
    }
}
