//! Profile store: the experience and level columns on the provider's
//! users table. Both values are always written together, level derived
//! from experience by the progression calculator.

use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::UserProfile;

pub fn get_profile(conn: &Connection, user_id: i64) -> Result<Option<UserProfile>> {
  conn
    .query_row(
      "SELECT id, username, experience, level FROM users WHERE id = ?1",
      params![user_id],
      |row| {
        Ok(UserProfile {
          user_id: row.get(0)?,
          username: row.get(1)?,
          experience: row.get(2)?,
          level: row.get(3)?,
        })
      },
    )
    .optional()
}

pub fn set_experience_and_level(
  conn: &Connection,
  user_id: i64,
  experience: i64,
  level: i64,
) -> Result<()> {
  conn.execute(
    "UPDATE users SET experience = ?1, level = ?2 WHERE id = ?3",
    params![experience, level, user_id],
  )?;
  Ok(())
}
