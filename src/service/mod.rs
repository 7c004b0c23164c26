/// Service operations for learner progress
///
/// This module contains the operations the API gateway can call: enrolling
/// learners, completing chapters, recording activity, status queries, and
/// the administrative shortcuts. Each operation is a plain function over the
/// storage trait with serde params/response structs at the boundary.

pub mod activity;
pub mod admin;
pub mod complete;
pub mod enroll;
pub mod status;

// Re-export operation functions for easy access
pub use activity::*;
pub use admin::*;
pub use complete::*;
pub use enroll::*;
pub use status::*;

use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// Errors surfaced by service operations
///
/// Validation failures are rejected before any mutation; storage failures
/// propagate with no partial write behind them (the save is transactional).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Parse an optional RFC 3339 boundary timestamp, defaulting to now
pub(crate) fn parse_occurred_at(
    raw: Option<String>,
) -> Result<chrono::DateTime<chrono::Utc>, DomainError> {
    match raw {
        Some(s) => chrono::DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|_| DomainError::InvalidTimestamp(s)),
        None => Ok(chrono::Utc::now()),
    }
}
