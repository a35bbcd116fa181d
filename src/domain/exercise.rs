use serde::{Deserialize, Serialize};

/// A translation exercise as authored in the catalog.
///
/// Immutable from the learner-facing flow; the catalog is seeded at startup
/// and otherwise managed by the administrative collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
  pub id: String,
  /// Category tag, e.g. "translation"
  #[serde(rename = "type")]
  pub kind: String,
  /// Difficulty tag, e.g. "beginner", "advanced"
  pub level: String,
  pub prompt: String,
  pub reference_answer: String,
  pub tags: Vec<String>,
}

/// Optional selection filter. Absent fields impose no constraint;
/// present fields combine with AND semantics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseFilter {
  #[serde(rename = "type", default)]
  pub kind: Option<String>,
  #[serde(default)]
  pub level: Option<String>,
  #[serde(default)]
  pub tag: Option<String>,
}

impl ExerciseFilter {
  pub fn is_empty(&self) -> bool {
    self.kind.is_none() && self.level.is_none() && self.tag.is_none()
  }
}

impl Exercise {
  /// True when the exercise satisfies every constraint the filter carries.
  /// The tag constraint is set membership over the exercise's tags.
  pub fn matches(&self, filter: &ExerciseFilter) -> bool {
    if let Some(kind) = &filter.kind {
      if &self.kind != kind {
        return false;
      }
    }
    if let Some(level) = &filter.level {
      if &self.level != level {
        return false;
      }
    }
    if let Some(tag) = &filter.tag {
      if !self.tags.iter().any(|t| t == tag) {
        return false;
      }
    }
    true
  }
}
