//! In-memory storage for live attempt sessions.
//!
//! Stores AttemptSession state keyed by a generated session ID returned to
//! the client when an exercise starts. Sessions auto-expire after a
//! configurable duration of inactivity and never survive a restart.

use crate::config;
use crate::training::AttemptSession;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

/// Session entry with last access time for expiration
struct SessionEntry {
  session: AttemptSession,
  last_access: DateTime<Utc>,
}

/// Global session store
static SESSIONS: LazyLock<Mutex<HashMap<String, SessionEntry>>> =
  LazyLock::new(|| Mutex::new(HashMap::new()));

/// Store a new session and hand back its generated ID.
pub fn create_session(session: AttemptSession) -> String {
  let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");

  // Clean up expired sessions occasionally (~10% chance)
  if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
    cleanup_expired(&mut sessions);
  }

  let session_id = generate_session_id();
  sessions.insert(
    session_id.clone(),
    SessionEntry {
      session,
      last_access: Utc::now(),
    },
  );
  session_id
}

/// Look up a session by ID. Unknown IDs are None; no session is created
/// implicitly.
pub fn get_session(session_id: &str) -> Option<AttemptSession> {
  let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");
  let entry = sessions.get_mut(session_id)?;
  entry.last_access = Utc::now();
  Some(entry.session.clone())
}

/// Write back an updated session
pub fn update_session(session_id: &str, session: AttemptSession) {
  let mut sessions = SESSIONS.lock().expect("Session store lock poisoned");
  sessions.insert(
    session_id.to_string(),
    SessionEntry {
      session,
      last_access: Utc::now(),
    },
  );
}

/// Clean up expired sessions
fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::ATTEMPT_SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_then_get() {
    let id = create_session(AttemptSession::new("ex001"));
    let session = get_session(&id).unwrap();
    assert_eq!(session.exercise_id(), "ex001");
  }

  #[test]
  fn test_unknown_id_is_none() {
    assert!(get_session("no-such-session").is_none());
  }

  #[test]
  fn test_update_persists_state_changes() {
    let id = create_session(AttemptSession::new("ex001"));

    let mut session = get_session(&id).unwrap();
    session.submit("hola", "hola").unwrap();
    update_session(&id, session);

    let reloaded = get_session(&id).unwrap();
    assert_eq!(reloaded.last_score(), Some(100));
  }

  #[test]
  fn test_ids_are_unique_and_well_formed() {
    let a = generate_session_id();
    let b = generate_session_id();
    assert_ne!(a, b);
    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
  }
}
