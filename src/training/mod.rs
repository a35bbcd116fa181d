//! Core training logic: answer scoring, the attempt state machine,
//! XP progression, badge rules, and random exercise selection.
//!
//! Everything here is pure and synchronous; the HTTP layer and the stores
//! drive it.

pub mod attempt;
pub mod badges;
pub mod progression;
pub mod scoring;
pub mod selector;

pub use attempt::{AttemptError, AttemptSession, AttemptStage, Submission};
pub use badges::{evaluate_badges, BadgeStatus};
pub use progression::{apply_score, level_for, Progression};
pub use scoring::{missing_words, similarity_score};
pub use selector::pick_exercise;
