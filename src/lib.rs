/// Public library interface for the SignBuddy progress service
///
/// This module exports the server implementation and the public types used
/// by the API gateway integration and by the test suites.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod rpc;
mod service;
mod storage;

// Re-export public modules and types
pub use domain::*;
pub use rpc::protocol;
pub use rpc::RpcServer;
pub use service::{
    complete_chapter, complete_up_to, enroll_learner, get_status, record_activity,
    reset_progress, reset_streak, withdraw_learner, AdminResponse, CompleteChapterParams,
    CompleteChapterResponse, CompleteUpToParams, EnrollParams, EnrollResponse, LearnerParams,
    RecordActivityParams, RecordActivityResponse, ServiceError, StatusParams, StatusResponse,
};
pub use storage::{LearnerStorage, SqliteStorage, StorageError};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Progress service wiring storage to the JSON-RPC loop
///
/// The service owns a SQLite database of learner records and exposes the
/// chapter-progression and streak operations over stdin/stdout.
pub struct ProgressServer {
    storage: SqliteStorage,
}

impl ProgressServer {
    /// Create a new progress server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing progress service with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;

        Ok(Self { storage })
    }

    /// Run the JSON-RPC server over stdin/stdout
    ///
    /// This method will block until stdin closes or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting progress service...");

        let rpc_server = RpcServer::new(self.storage);
        rpc_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }
}
