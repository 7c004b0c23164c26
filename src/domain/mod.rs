/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Learner, chapter progression rules,
/// streak engine) and their validation rules. These types represent the
/// learning-progress concepts in SignBuddy.

pub mod learner;
pub mod progress;
pub mod streak;
pub mod types;

// Re-export public types for easy access; the rule functions stay behind
// their module names (progress::complete_chapter, streak::record_activity)
pub use learner::*;
pub use progress::ProgressEvent;
pub use streak::StreakOutcome;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
///
/// All of these are rejected synchronously, before any state is touched.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid chapter id: {0}")]
    InvalidChapterId(String),

    #[error("Invalid learner id: {0}")]
    InvalidLearnerId(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
