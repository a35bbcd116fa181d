//! Result store: append-only exercise outcomes.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use crate::domain::ExerciseResult;

/// Aggregate view of a user's history for the dashboard.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct HistoryStats {
  pub exercises_completed: i64,
  pub average_score: i64,
}

/// Append one terminal-attempt result. The learner-facing flow never
/// updates or deletes rows in this table.
pub fn insert_result(
  conn: &Connection,
  user_id: i64,
  exercise_id: &str,
  answer: &str,
  score: u8,
  feedback: &str,
) -> Result<ExerciseResult> {
  let created_at = Utc::now();
  conn.execute(
    r#"
    INSERT INTO exercise_results (user_id, exercise_id, answer, score, feedback, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
    params![
      user_id,
      exercise_id,
      answer,
      score as i64,
      feedback,
      created_at.to_rfc3339(),
    ],
  )?;

  Ok(ExerciseResult {
    id: conn.last_insert_rowid(),
    user_id,
    exercise_id: exercise_id.to_string(),
    answer: answer.to_string(),
    score: score as i64,
    feedback: feedback.to_string(),
    created_at,
  })
}

/// Full result history for a user, newest first.
pub fn history_for_user(conn: &Connection, user_id: i64) -> Result<Vec<ExerciseResult>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, user_id, exercise_id, answer, score, feedback, created_at
    FROM exercise_results
    WHERE user_id = ?1
    ORDER BY created_at DESC, id DESC
    "#,
  )?;

  let results = stmt
    .query_map(params![user_id], |row| row_to_result(row))?
    .collect::<Result<Vec<_>>>()?;
  Ok(results)
}

pub fn history_stats(conn: &Connection, user_id: i64) -> Result<HistoryStats> {
  conn.query_row(
    "SELECT COUNT(*), COALESCE(AVG(score), 0.0) FROM exercise_results WHERE user_id = ?1",
    params![user_id],
    |row| {
      let exercises_completed: i64 = row.get(0)?;
      let average: f64 = row.get(1)?;
      Ok(HistoryStats {
        exercises_completed,
        average_score: average.round() as i64,
      })
    },
  )
}

fn row_to_result(row: &rusqlite::Row) -> Result<ExerciseResult> {
  let created_at_str: String = row.get(6)?;

  Ok(ExerciseResult {
    id: row.get(0)?,
    user_id: row.get(1)?,
    exercise_id: row.get(2)?,
    answer: row.get(3)?,
    score: row.get(4)?,
    feedback: row.get(5)?,
    created_at: DateTime::parse_from_rfc3339(&created_at_str)
      .map(|dt| dt.with_timezone(&Utc))
      .unwrap_or_else(|_| Utc::now()),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_insert_and_history_roundtrip() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();
    let user_id = crate::db::sessions::insert_user(&conn, "maria").unwrap();

    let result = insert_result(&conn, user_id, "ex001", "una respuesta", 72, "feedback").unwrap();
    assert!(result.id > 0);
    assert_eq!(result.score, 72);

    let history = history_for_user(&conn, user_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exercise_id, "ex001");
    assert_eq!(history[0].answer, "una respuesta");
  }

  #[test]
  fn test_history_is_newest_first() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();
    let user_id = crate::db::sessions::insert_user(&conn, "maria").unwrap();

    insert_result(&conn, user_id, "ex001", "a", 10, "f1").unwrap();
    insert_result(&conn, user_id, "ex002", "b", 20, "f2").unwrap();
    insert_result(&conn, user_id, "ex003", "c", 30, "f3").unwrap();

    let history = history_for_user(&conn, user_id).unwrap();
    let ids: Vec<&str> = history.iter().map(|r| r.exercise_id.as_str()).collect();
    assert_eq!(ids, vec!["ex003", "ex002", "ex001"]);
  }

  #[test]
  fn test_history_is_scoped_to_user() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();
    let maria = crate::db::sessions::insert_user(&conn, "maria").unwrap();
    let joao = crate::db::sessions::insert_user(&conn, "joao").unwrap();

    insert_result(&conn, maria, "ex001", "a", 50, "f").unwrap();

    assert_eq!(history_for_user(&conn, maria).unwrap().len(), 1);
    assert!(history_for_user(&conn, joao).unwrap().is_empty());
  }

  #[test]
  fn test_stats_average_is_rounded() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();
    let user_id = crate::db::sessions::insert_user(&conn, "maria").unwrap();

    insert_result(&conn, user_id, "ex001", "a", 70, "f").unwrap();
    insert_result(&conn, user_id, "ex002", "b", 75, "f").unwrap();

    let stats = history_stats(&conn, user_id).unwrap();
    assert_eq!(stats.exercises_completed, 2);
    // (70 + 75) / 2 = 72.5 rounds to 73
    assert_eq!(stats.average_score, 73);
  }

  #[test]
  fn test_stats_for_empty_history() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    let user_id = crate::db::sessions::insert_user(&conn, "maria").unwrap();

    let stats = history_stats(&conn, user_id).unwrap();
    assert_eq!(stats.exercises_completed, 0);
    assert_eq!(stats.average_score, 0);
  }
}
