//! Application state passed to all handlers.

use crate::db::DbPool;

#[derive(Clone)]
pub struct AppState {
    /// Shared database (users, sessions, exercises, results)
    pub db: DbPool,
}

impl AppState {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }
}
