/// Storage layer for persisting learner progress
///
/// This module handles all database operations using SQLite. It provides
/// a clean interface for storing and retrieving learner records, including
/// the chapter membership set and streak fields.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;

use crate::domain::{Learner, LearnerId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Learner not found: {learner_id}")]
    LearnerNotFound { learner_id: String },

    #[error("Learner already enrolled: {learner_id}")]
    LearnerExists { learner_id: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for learner records
///
/// The service layer is written against this trait so the SQLite backend can
/// be swapped out (and so tests can use throwaway databases).
pub trait LearnerStorage {
    /// Create a new learner record at enrollment
    fn create_learner(&self, learner: &Learner) -> Result<(), StorageError>;

    /// Load a learner's full record (streak fields + completed chapters)
    fn get_learner(&self, learner_id: &LearnerId) -> Result<Learner, StorageError>;

    /// Write back a learner's full record
    ///
    /// Streak fields and the chapter set commit in one transaction; a failed
    /// save leaves the stored record exactly as it was.
    fn save_learner(&self, learner: &Learner) -> Result<(), StorageError>;

    /// Remove a learner and all their progress (account deletion boundary)
    fn delete_learner(&self, learner_id: &LearnerId) -> Result<(), StorageError>;
}
