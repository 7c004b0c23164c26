/// SQLite implementation of the learner storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving learner progress. It handles all SQL queries and the
/// conversion between database rows and domain types.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::domain::{Learner, LearnerId};
use crate::storage::{migrations, LearnerStorage, StorageError};

/// SQLite-based storage implementation
///
/// Holds one connection; the request loop drives it serially, so updates
/// for a single learner apply in the order their requests were accepted.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        // Enable foreign key constraints (needed for ON DELETE CASCADE)
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        // Initialize/migrate the database schema
        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// In-memory database for tests and throwaway runs
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn parse_timestamp(s: &str, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    column,
                    "Invalid datetime".to_string(),
                    rusqlite::types::Type::Text,
                )
            })
    }

    /// Load the completed-chapter set for a learner
    fn load_chapters(&self, learner_id: &LearnerId) -> Result<BTreeSet<u32>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT chapter_id FROM learner_chapters WHERE learner_id = ?1 ORDER BY chapter_id",
        )?;

        let chapter_iter = stmt.query_map(params![learner_id.to_string()], |row| {
            row.get::<_, u32>(0)
        })?;

        let mut chapters = BTreeSet::new();
        for chapter in chapter_iter {
            chapters.insert(chapter?);
        }

        Ok(chapters)
    }
}

impl LearnerStorage for SqliteStorage {
    /// Create a new learner record at enrollment
    fn create_learner(&self, learner: &Learner) -> Result<(), StorageError> {
        let result = self.conn.execute(
            "INSERT INTO learners (id, current_streak, last_activity_at, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                learner.id.to_string(),
                learner.current_streak,
                learner.last_activity_at.map(|t| t.to_rfc3339()),
                learner.created_at.to_rfc3339()
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Enrolled learner: {}", learner.id);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::LearnerExists {
                    learner_id: learner.id.to_string(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    /// Load a learner's full record
    fn get_learner(&self, learner_id: &LearnerId) -> Result<Learner, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT current_streak, last_activity_at, created_at FROM learners WHERE id = ?1",
        )?;

        let result = stmt.query_row(params![learner_id.to_string()], |row| {
            let current_streak: u32 = row.get(0)?;

            let last_activity_str: Option<String> = row.get(1)?;
            let last_activity_at = match last_activity_str {
                Some(s) => Some(Self::parse_timestamp(&s, 1)?),
                None => None,
            };

            let created_at_str: String = row.get(2)?;
            let created_at = Self::parse_timestamp(&created_at_str, 2)?;

            Ok((current_streak, last_activity_at, created_at))
        });

        let (current_streak, last_activity_at, created_at) = match result {
            Ok(fields) => fields,
            Err(rusqlite::Error::QueryReturnedNoRows) => {
                return Err(StorageError::LearnerNotFound {
                    learner_id: learner_id.to_string(),
                })
            }
            Err(e) => return Err(StorageError::Query(e)),
        };

        let completed_chapters = self.load_chapters(learner_id)?;

        Ok(Learner::from_existing(
            learner_id.clone(),
            completed_chapters,
            current_streak,
            last_activity_at,
            created_at,
        ))
    }

    /// Write back a learner's full record in one transaction
    ///
    /// Streak fields and the chapter set commit together or not at all.
    /// Existing chapter rows keep their original completion timestamp.
    fn save_learner(&self, learner: &Learner) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;

        let rows_affected = tx.execute(
            "UPDATE learners SET current_streak = ?2, last_activity_at = ?3 WHERE id = ?1",
            params![
                learner.id.to_string(),
                learner.current_streak,
                learner.last_activity_at.map(|t| t.to_rfc3339())
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::LearnerNotFound {
                learner_id: learner.id.to_string(),
            });
        }

        // Drop rows no longer in the set (only happens on reset_progress)
        {
            let mut stmt = tx.prepare(
                "SELECT chapter_id FROM learner_chapters WHERE learner_id = ?1",
            )?;
            let existing = stmt
                .query_map(params![learner.id.to_string()], |row| row.get::<_, u32>(0))?
                .collect::<Result<Vec<u32>, _>>()?;

            for chapter_id in existing {
                if !learner.completed_chapters.contains(&chapter_id) {
                    tx.execute(
                        "DELETE FROM learner_chapters WHERE learner_id = ?1 AND chapter_id = ?2",
                        params![learner.id.to_string(), chapter_id],
                    )?;
                }
            }
        }

        // Insert new completions; existing rows are left untouched
        let now = Utc::now().to_rfc3339();
        for chapter_id in &learner.completed_chapters {
            tx.execute(
                "INSERT OR IGNORE INTO learner_chapters (learner_id, chapter_id, completed_at)
                 VALUES (?1, ?2, ?3)",
                params![learner.id.to_string(), chapter_id, now],
            )?;
        }

        tx.commit()?;

        tracing::debug!(
            "Saved learner {}: streak={}, chapters={}",
            learner.id,
            learner.current_streak,
            learner.completed_chapters.len()
        );
        Ok(())
    }

    /// Remove a learner and all their progress
    fn delete_learner(&self, learner_id: &LearnerId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM learners WHERE id = ?1",
            params![learner_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::LearnerNotFound {
                learner_id: learner_id.to_string(),
            });
        }

        tracing::debug!("Deleted learner: {}", learner_id);
        Ok(())
    }
}
