pub mod catalog;
pub mod profiles;
pub mod results;
pub mod schema;
pub mod sessions;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use schema::run_migrations;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    match self {
      Ok(v) => v,
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        T::default()
      }
    }
  }
}

/// Error returned when the database lock cannot be acquired
#[derive(Debug)]
pub struct DbLockError;

impl std::fmt::Display for DbLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Database unavailable")
  }
}

impl std::error::Error for DbLockError {}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, DbLockError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    DbLockError
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).ok();
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  Ok(Arc::new(Mutex::new(conn)))
}

/// Seed the starter exercise catalog if the table is empty (idempotent).
pub fn seed_exercises(conn: &Connection) -> Result<()> {
  let count: i64 = conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
  if count > 0 {
    return Ok(());
  }

  for exercise in starter_exercises() {
    catalog::insert_exercise(conn, &exercise)?;
  }
  Ok(())
}

// Helper to build a catalog entry
fn exercise(
  id: &str,
  kind: &str,
  level: &str,
  prompt: &str,
  reference_answer: &str,
  tags: &[&str],
) -> crate::domain::Exercise {
  crate::domain::Exercise {
    id: id.to_string(),
    kind: kind.to_string(),
    level: level.to_string(),
    prompt: prompt.to_string(),
    reference_answer: reference_answer.to_string(),
    tags: tags.iter().map(|t| t.to_string()).collect(),
  }
}

fn starter_exercises() -> Vec<crate::domain::Exercise> {
  vec![
    exercise(
      "ex001",
      "translation",
      "advanced",
      "Traduza para espanhol: 'O impacto das redes sociais no comportamento humano é crescente.'",
      "El impacto de las redes sociales en el comportamiento humano está en aumento.",
      &["sociedade", "comportamento", "tecnologia"],
    ),
    exercise(
      "ex002",
      "translation",
      "beginner",
      "Traduza para espanhol: 'Eu gosto de café com leite.'",
      "Me gusta el café con leche.",
      &["cotidiano", "alimentação"],
    ),
    exercise(
      "ex003",
      "translation",
      "beginner",
      "Traduza para espanhol: 'Onde fica a estação de trem?'",
      "¿Dónde está la estación de tren?",
      &["viagem", "cotidiano"],
    ),
    exercise(
      "ex004",
      "translation",
      "intermediate",
      "Traduza para espanhol: 'Ontem fomos ao cinema com nossos amigos.'",
      "Ayer fuimos al cine con nuestros amigos.",
      &["lazer", "cotidiano"],
    ),
    exercise(
      "ex005",
      "translation",
      "intermediate",
      "Traduza para espanhol: 'Ela trabalha como engenheira numa empresa de tecnologia.'",
      "Ella trabaja como ingeniera en una empresa de tecnología.",
      &["trabalho", "tecnologia"],
    ),
    exercise(
      "ex006",
      "translation",
      "advanced",
      "Traduza para espanhol: 'Se eu tivesse mais tempo, aprenderia outro idioma.'",
      "Si tuviera más tiempo, aprendería otro idioma.",
      &["educação", "condicional"],
    ),
  ]
}
