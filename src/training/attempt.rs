//! The attempt state machine for one exercise session.
//!
//! A session walks Attempt1 → Attempt2 → Attempt3 and then locks. Each
//! submission scores the answer and builds attempt-specific feedback;
//! only the third submission is terminal and worth persisting.

use serde::Serialize;

use super::scoring::{missing_words, similarity_score};

/// Fixed study suggestion shown on the third attempt.
const REVIEW_SUGGESTION: &str =
  "Reveja: uso de tempos verbais, vocabulário de tecnologia e estrutura de frases complexas.";

/// Placeholder when no reference word is missing from the answer.
const NO_MISSING_WORDS: &str = "nenhuma!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttemptStage {
  Attempt1,
  Attempt2,
  Attempt3,
  Locked,
}

impl AttemptStage {
  /// 1-based attempt number; Locked reports the last scored attempt.
  pub fn number(&self) -> u8 {
    match self {
      Self::Attempt1 => 1,
      Self::Attempt2 => 2,
      Self::Attempt3 | Self::Locked => 3,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptError {
  /// The terminal submission already happened; no further answers accepted.
  Locked,
  /// "Try again" before submitting an answer for the current attempt.
  NothingToRetry,
  /// "Try again" from the third attempt; there is no fourth.
  NoRetriesLeft,
}

impl std::fmt::Display for AttemptError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Locked => write!(f, "attempt limit reached"),
      Self::NothingToRetry => write!(f, "no scored attempt to retry"),
      Self::NoRetriesLeft => write!(f, "no retries left after the third attempt"),
    }
  }
}

impl std::error::Error for AttemptError {}

/// Outcome of one scored submission.
#[derive(Debug, Clone)]
pub struct Submission {
  pub attempt: u8,
  pub score: u8,
  pub feedback: String,
  /// True for the third attempt: the caller must persist the result and
  /// apply progression.
  pub terminal: bool,
}

/// Ephemeral state of one exercise being worked on. Held server-side in the
/// attempt-session store, never persisted.
#[derive(Debug, Clone)]
pub struct AttemptSession {
  exercise_id: String,
  stage: AttemptStage,
  last_score: Option<u8>,
  last_feedback: Option<String>,
}

impl AttemptSession {
  pub fn new(exercise_id: impl Into<String>) -> Self {
    Self {
      exercise_id: exercise_id.into(),
      stage: AttemptStage::Attempt1,
      last_score: None,
      last_feedback: None,
    }
  }

  pub fn exercise_id(&self) -> &str {
    &self.exercise_id
  }

  pub fn stage(&self) -> AttemptStage {
    self.stage
  }

  pub fn last_score(&self) -> Option<u8> {
    self.last_score
  }

  pub fn last_feedback(&self) -> Option<&str> {
    self.last_feedback.as_deref()
  }

  /// Score an answer against the reference and record attempt feedback.
  ///
  /// The third attempt is terminal: the session locks and the returned
  /// submission carries `terminal = true`.
  pub fn submit(&mut self, answer: &str, reference: &str) -> Result<Submission, AttemptError> {
    if self.stage == AttemptStage::Locked {
      return Err(AttemptError::Locked);
    }

    let attempt = self.stage.number();
    let score = similarity_score(answer, reference);
    let base = format!("Você acertou {}% da estrutura esperada.", score);

    let feedback = match self.stage {
      AttemptStage::Attempt1 => base,
      AttemptStage::Attempt2 => {
        let missing = missing_words(answer, reference);
        let listed = if missing.is_empty() {
          NO_MISSING_WORDS.to_string()
        } else {
          missing.join(", ")
        };
        format!("{} Palavras que faltaram: {}", base, listed)
      }
      AttemptStage::Attempt3 => format!("{} Sugestão: {}", base, REVIEW_SUGGESTION),
      AttemptStage::Locked => unreachable!("locked sessions reject submissions above"),
    };

    self.last_score = Some(score);
    self.last_feedback = Some(feedback.clone());

    let terminal = self.stage == AttemptStage::Attempt3;
    if terminal {
      self.stage = AttemptStage::Locked;
    }

    Ok(Submission {
      attempt,
      score,
      feedback,
      terminal,
    })
  }

  /// Advance to the next attempt, clearing the recorded score and feedback.
  ///
  /// Only permitted when the current attempt has been scored and a next
  /// attempt exists. Returns the new attempt number.
  pub fn try_again(&mut self) -> Result<u8, AttemptError> {
    match self.stage {
      AttemptStage::Locked => Err(AttemptError::Locked),
      AttemptStage::Attempt3 => Err(AttemptError::NoRetriesLeft),
      _ if self.last_score.is_none() => Err(AttemptError::NothingToRetry),
      AttemptStage::Attempt1 => {
        self.stage = AttemptStage::Attempt2;
        self.last_score = None;
        self.last_feedback = None;
        Ok(2)
      }
      AttemptStage::Attempt2 => {
        self.stage = AttemptStage::Attempt3;
        self.last_score = None;
        self.last_feedback = None;
        Ok(3)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const REFERENCE: &str = "el gato negro";

  #[test]
  fn test_session_starts_at_attempt_1() {
    let session = AttemptSession::new("ex1");
    assert_eq!(session.stage(), AttemptStage::Attempt1);
    assert!(session.last_score().is_none());
  }

  #[test]
  fn test_first_attempt_feedback_reports_only_percentage() {
    let mut session = AttemptSession::new("ex1");
    let sub = session.submit(REFERENCE, REFERENCE).unwrap();
    assert_eq!(sub.attempt, 1);
    assert_eq!(sub.score, 100);
    assert!(!sub.terminal);
    assert_eq!(sub.feedback, "Você acertou 100% da estrutura esperada.");
  }

  #[test]
  fn test_second_attempt_lists_missing_words() {
    let mut session = AttemptSession::new("ex1");
    session.submit("el perro", REFERENCE).unwrap();
    session.try_again().unwrap();

    let sub = session.submit("el perro", REFERENCE).unwrap();
    assert_eq!(sub.attempt, 2);
    assert!(sub
      .feedback
      .ends_with("Palavras que faltaram: gato, negro"));
  }

  #[test]
  fn test_second_attempt_with_nothing_missing() {
    let mut session = AttemptSession::new("ex1");
    session.submit(REFERENCE, REFERENCE).unwrap();
    session.try_again().unwrap();

    let sub = session.submit("EL GATO NEGRO", REFERENCE).unwrap();
    assert!(sub.feedback.ends_with("Palavras que faltaram: nenhuma!"));
  }

  #[test]
  fn test_third_attempt_is_terminal_with_suggestion() {
    let mut session = AttemptSession::new("ex1");
    session.submit("x", REFERENCE).unwrap();
    session.try_again().unwrap();
    session.submit("x", REFERENCE).unwrap();
    session.try_again().unwrap();

    let sub = session.submit("el gato", REFERENCE).unwrap();
    assert_eq!(sub.attempt, 3);
    assert!(sub.terminal);
    assert!(sub.feedback.contains("Sugestão: Reveja:"));
    assert_eq!(session.stage(), AttemptStage::Locked);
  }

  #[test]
  fn test_locked_session_rejects_submissions() {
    let mut session = AttemptSession::new("ex1");
    for _ in 0..2 {
      session.submit("x", REFERENCE).unwrap();
      session.try_again().unwrap();
    }
    session.submit("x", REFERENCE).unwrap();

    let err = session.submit("otra", REFERENCE).unwrap_err();
    assert_eq!(err, AttemptError::Locked);
  }

  #[test]
  fn test_try_again_requires_a_scored_attempt() {
    let mut session = AttemptSession::new("ex1");
    assert_eq!(session.try_again(), Err(AttemptError::NothingToRetry));

    session.submit("x", REFERENCE).unwrap();
    session.try_again().unwrap();
    // Attempt 2, nothing submitted yet
    assert_eq!(session.try_again(), Err(AttemptError::NothingToRetry));
  }

  #[test]
  fn test_no_try_again_from_third_attempt() {
    let mut session = AttemptSession::new("ex1");
    session.submit("x", REFERENCE).unwrap();
    session.try_again().unwrap();
    session.submit("x", REFERENCE).unwrap();
    session.try_again().unwrap();
    assert_eq!(session.try_again(), Err(AttemptError::NoRetriesLeft));
  }

  #[test]
  fn test_try_again_clears_score_and_feedback() {
    let mut session = AttemptSession::new("ex1");
    session.submit("el gato", REFERENCE).unwrap();
    assert!(session.last_score().is_some());

    session.try_again().unwrap();
    assert!(session.last_score().is_none());
    assert!(session.last_feedback().is_none());
  }
}
