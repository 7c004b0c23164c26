/// Read-only status queries for the UI
///
/// Backs the lessons screen (which chapters are done / unlocked) and the
/// profile screen (streak counter). Queries never mutate, and in particular
/// never touch the streak.

use serde::{Deserialize, Serialize};

use crate::domain::{progress, ChapterId, LearnerId};
use crate::service::ServiceError;
use crate::storage::LearnerStorage;

/// Parameters for a progress status query
#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub learner_id: String,
    /// When set, the response includes an unlock check for this chapter
    pub chapter_id: Option<u32>,
}

/// Response from a progress status query
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub learner_id: String,
    /// Completed chapters in ascending order
    pub completed_chapters: Vec<u32>,
    /// Lowest chapter not yet completed (always unlocked)
    pub next_chapter: u32,
    pub current_streak: u32,
    pub last_activity_at: Option<String>,
    /// Unlock check result when `chapter_id` was supplied
    pub chapter_unlocked: Option<bool>,
}

/// Query a learner's progress and streak state
pub fn get_status<S: LearnerStorage>(
    storage: &S,
    params: StatusParams,
) -> Result<StatusResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;

    let chapter = match params.chapter_id {
        Some(raw) => Some(ChapterId::new(raw)?),
        None => None,
    };

    let learner = storage.get_learner(&learner_id)?;

    Ok(StatusResponse {
        learner_id: learner.id.to_string(),
        completed_chapters: progress::completed_chapters(&learner),
        next_chapter: progress::next_chapter(&learner),
        current_streak: learner.current_streak,
        last_activity_at: learner.last_activity_at.map(|t| t.to_rfc3339()),
        chapter_unlocked: chapter.map(|c| progress::is_unlocked(&learner, c)),
    })
}
