/// Database migration management
///
/// This module handles creating and updating the SQLite database schema.
/// It ensures the database has all the required tables and indexes.

use rusqlite::Connection;

use crate::storage::StorageError;

/// Current database schema version
///
/// Increment this when you add new migrations
const CURRENT_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This creates all required tables and indexes if they don't exist.
/// It also sets up the version tracking for future migrations.
pub fn initialize_database(conn: &Connection) -> Result<(), StorageError> {
    // Create version tracking table first
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    // Check current version
    let current_version = get_current_version(conn)?;

    // Run migrations if needed
    if current_version < CURRENT_VERSION {
        run_migrations(conn, current_version)?;
        set_version(conn, CURRENT_VERSION)?;
    }

    Ok(())
}

/// Get the current database schema version
fn get_current_version(conn: &Connection) -> Result<i32, StorageError> {
    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get::<_, i32>(0)
        })
        .unwrap_or(0); // Default to version 0 if no version record exists

    Ok(version)
}

/// Set the database schema version
fn set_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Run database migrations from the current version to the latest
fn run_migrations(conn: &Connection, from_version: i32) -> Result<(), StorageError> {
    if from_version < 1 {
        migration_v1(conn)?;
    }

    // Future migrations would go here:
    // if from_version < 2 {
    //     migration_v2(conn)?;
    // }

    Ok(())
}

/// Migration to version 1: Create initial tables
///
/// The learner row carries the streak fields inline (one document per user,
/// matching the low-contention read-modify-write in the service layer);
/// chapter completions live in their own membership table.
fn migration_v1(conn: &Connection) -> Result<(), StorageError> {
    // Create learners table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS learners (
            id TEXT PRIMARY KEY,
            current_streak INTEGER NOT NULL DEFAULT 0,
            last_activity_at TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    // Create chapter membership table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS learner_chapters (
            learner_id TEXT NOT NULL,
            chapter_id INTEGER NOT NULL,
            completed_at TEXT NOT NULL,
            PRIMARY KEY (learner_id, chapter_id),
            FOREIGN KEY (learner_id) REFERENCES learners (id) ON DELETE CASCADE
        )",
        [],
    )?;

    // Index for snapshot queries in chapter order
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_learner_chapters_learner
         ON learner_chapters (learner_id, chapter_id)",
        [],
    )?;

    tracing::info!("Applied migration v1: Created initial database schema");
    Ok(())
}
