//! Catalog store: the authored exercise table.

use rusqlite::{params, Connection, Result};

use crate::domain::{Exercise, ExerciseFilter};

pub fn insert_exercise(conn: &Connection, exercise: &Exercise) -> Result<()> {
  let tags = serde_json::to_string(&exercise.tags).unwrap_or_else(|_| "[]".to_string());
  conn.execute(
    r#"
    INSERT INTO exercises (id, kind, level, prompt, reference_answer, tags)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
    params![
      exercise.id,
      exercise.kind,
      exercise.level,
      exercise.prompt,
      exercise.reference_answer,
      tags,
    ],
  )?;
  Ok(())
}

pub fn get_exercise_by_id(conn: &Connection, id: &str) -> Result<Option<Exercise>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, kind, level, prompt, reference_answer, tags
    FROM exercises WHERE id = ?1
    "#,
  )?;

  let mut rows = stmt.query(params![id])?;
  if let Some(row) = rows.next()? {
    Ok(Some(row_to_exercise(row)?))
  } else {
    Ok(None)
  }
}

/// List exercises matching the filter. Rows are fetched whole and matched
/// through `Exercise::matches`, which owns the filter contract; an empty
/// filter returns the full catalog without a matching pass.
pub fn list_exercises(conn: &Connection, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
  let mut stmt = conn.prepare(
    "SELECT id, kind, level, prompt, reference_answer, tags FROM exercises ORDER BY id",
  )?;
  let exercises = stmt
    .query_map([], |row| row_to_exercise(row))?
    .collect::<Result<Vec<_>>>()?;

  if filter.is_empty() {
    return Ok(exercises);
  }

  Ok(
    exercises
      .into_iter()
      .filter(|e| e.matches(filter))
      .collect(),
  )
}

fn row_to_exercise(row: &rusqlite::Row) -> Result<Exercise> {
  let tags_json: String = row.get(5)?;

  Ok(Exercise {
    id: row.get(0)?,
    kind: row.get(1)?,
    level: row.get(2)?,
    prompt: row.get(3)?,
    reference_answer: row.get(4)?,
    tags: serde_json::from_str(&tags_json).unwrap_or_default(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_insert_and_get_roundtrip() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();

    let exercise = get_exercise_by_id(&conn, "ex001").unwrap().unwrap();
    assert_eq!(exercise.kind, "translation");
    assert_eq!(exercise.level, "advanced");
    assert_eq!(
      exercise.tags,
      vec!["sociedade", "comportamento", "tecnologia"]
    );
  }

  #[test]
  fn test_get_unknown_id_returns_none() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    assert!(get_exercise_by_id(&conn, "missing").unwrap().is_none());
  }

  #[test]
  fn test_list_without_filter_returns_whole_catalog() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();

    let all = list_exercises(&conn, &ExerciseFilter::default()).unwrap();
    assert_eq!(all.len(), 6);
  }

  #[test]
  fn test_list_filters_combine_with_and() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();

    let filter = ExerciseFilter {
      kind: Some("translation".to_string()),
      level: Some("beginner".to_string()),
      tag: Some("viagem".to_string()),
    };
    let matched = list_exercises(&conn, &filter).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].id, "ex003");
  }

  #[test]
  fn test_list_by_tag_only() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();

    let filter = ExerciseFilter {
      tag: Some("tecnologia".to_string()),
      ..Default::default()
    };
    let matched = list_exercises(&conn, &filter).unwrap();
    let ids: Vec<&str> = matched.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["ex001", "ex005"]);
  }

  #[test]
  fn test_list_with_no_match_is_empty() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();

    let filter = ExerciseFilter {
      level: Some("impossible".to_string()),
      ..Default::default()
    };
    assert!(list_exercises(&conn, &filter).unwrap().is_empty());
  }

  #[test]
  fn test_seed_is_idempotent() {
    let env = TestEnv::new().unwrap();
    let conn = env.conn();
    crate::db::seed_exercises(&conn).unwrap();
    crate::db::seed_exercises(&conn).unwrap();

    let all = list_exercises(&conn, &ExerciseFilter::default()).unwrap();
    assert_eq!(all.len(), 6);
  }
}
