pub mod exercise;
pub mod profile;
pub mod result;

pub use exercise::{Exercise, ExerciseFilter};
pub use profile::UserProfile;
pub use result::ExerciseResult;
