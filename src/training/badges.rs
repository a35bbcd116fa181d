//! Declarative badge rules.
//!
//! Each badge is an id plus a pure predicate over the user's result history
//! and profile. All rules are evaluated on every dashboard query; nothing
//! about badges is persisted.

use serde::Serialize;

use crate::domain::{ExerciseResult, UserProfile};

struct BadgeRule {
  id: &'static str,
  name: &'static str,
  description: &'static str,
  earned: fn(&[ExerciseResult], &UserProfile) -> bool,
}

const RULES: [BadgeRule; 4] = [
  BadgeRule {
    id: "primeiro_passo",
    name: "Primeiro Passo",
    description: "Complete seu primeiro exercício.",
    earned: |history, _| !history.is_empty(),
  },
  BadgeRule {
    id: "dedicacao",
    name: "Dedicação",
    description: "Complete dez exercícios.",
    earned: |history, _| history.len() >= 10,
  },
  BadgeRule {
    id: "pontuacao_perfeita",
    name: "Pontuação Perfeita",
    description: "Alcance 100% em um exercício.",
    earned: |history, _| history.iter().any(|r| r.score == 100),
  },
  BadgeRule {
    id: "nivel_cinco",
    name: "Nível 5",
    description: "Alcance o nível 5.",
    earned: |_, profile| profile.level >= 5,
  },
];

#[derive(Debug, Clone, Serialize)]
pub struct BadgeStatus {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub earned: bool,
}

/// Evaluate every badge rule against the given history and profile.
pub fn evaluate_badges(history: &[ExerciseResult], profile: &UserProfile) -> Vec<BadgeStatus> {
  RULES
    .iter()
    .map(|rule| BadgeStatus {
      id: rule.id,
      name: rule.name,
      description: rule.description,
      earned: (rule.earned)(history, profile),
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;

  fn profile(experience: i64, level: i64) -> UserProfile {
    UserProfile {
      user_id: 1,
      username: "maria".to_string(),
      experience,
      level,
    }
  }

  fn result(score: i64) -> ExerciseResult {
    ExerciseResult {
      id: 0,
      user_id: 1,
      exercise_id: "ex1".to_string(),
      answer: String::new(),
      score,
      feedback: String::new(),
      created_at: Utc::now(),
    }
  }

  fn earned(statuses: &[BadgeStatus], id: &str) -> bool {
    statuses.iter().find(|b| b.id == id).unwrap().earned
  }

  #[test]
  fn test_new_user_earns_nothing() {
    let statuses = evaluate_badges(&[], &profile(0, 1));
    assert!(statuses.iter().all(|b| !b.earned));
  }

  #[test]
  fn test_first_exercise_badge() {
    let statuses = evaluate_badges(&[result(40)], &profile(40, 1));
    assert!(earned(&statuses, "primeiro_passo"));
    assert!(!earned(&statuses, "dedicacao"));
  }

  #[test]
  fn test_ten_exercises_badge() {
    let history: Vec<ExerciseResult> = (0..10).map(|_| result(50)).collect();
    let statuses = evaluate_badges(&history, &profile(500, 2));
    assert!(earned(&statuses, "dedicacao"));
  }

  #[test]
  fn test_perfect_score_badge() {
    let statuses = evaluate_badges(&[result(99)], &profile(99, 1));
    assert!(!earned(&statuses, "pontuacao_perfeita"));

    let statuses = evaluate_badges(&[result(99), result(100)], &profile(199, 1));
    assert!(earned(&statuses, "pontuacao_perfeita"));
  }

  #[test]
  fn test_level_five_badge() {
    let statuses = evaluate_badges(&[], &profile(2_000, 5));
    assert!(earned(&statuses, "nivel_cinco"));
  }

  #[test]
  fn test_every_rule_is_reported() {
    let statuses = evaluate_badges(&[], &profile(0, 1));
    assert_eq!(statuses.len(), 4);
  }
}
