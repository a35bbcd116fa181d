//! Experience and level derivation from terminal exercise scores.

/// Experience required per level step.
pub const XP_PER_LEVEL: i64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
  pub experience: i64,
  pub level: i64,
}

/// Level for a given accumulated experience: floor(xp / 500) + 1.
pub fn level_for(experience: i64) -> i64 {
  experience / XP_PER_LEVEL + 1
}

/// Add a terminal score to the prior experience and recompute the level.
/// Experience only ever grows; there is no cap.
pub fn apply_score(experience: i64, score: u8) -> Progression {
  let experience = experience + score as i64;
  Progression {
    experience,
    level: level_for(experience),
  }
}
