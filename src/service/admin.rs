/// Administrative operations for support and debug tooling
///
/// Access control lives in the gateway (admin role checks); these
/// operations trust the caller. None of them count as learner activity.

use serde::{Deserialize, Serialize};

use crate::domain::{progress, streak, ChapterId, DomainError, LearnerId};
use crate::service::ServiceError;
use crate::storage::LearnerStorage;

/// Upper bound for the bulk-complete shortcut
///
/// The chapter catalog is far smaller than this; a bigger id in a bulk
/// request is a bad argument, not a support action, and would insert one
/// row per chapter.
const MAX_BULK_CHAPTER: u32 = 1_000;

/// Parameters naming a single learner
#[derive(Debug, Deserialize)]
pub struct LearnerParams {
    pub learner_id: String,
}

/// Parameters for the bulk-complete shortcut
#[derive(Debug, Deserialize)]
pub struct CompleteUpToParams {
    pub learner_id: String,
    pub chapter_id: u32,
}

/// Response from an administrative mutation
#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub learner_id: String,
    pub completed_chapters: Vec<u32>,
    pub current_streak: u32,
}

fn snapshot(learner: &crate::domain::Learner) -> AdminResponse {
    AdminResponse {
        learner_id: learner.id.to_string(),
        completed_chapters: progress::completed_chapters(learner),
        current_streak: learner.current_streak,
    }
}

/// Clear all chapter progress for a learner (streak untouched)
pub fn reset_progress<S: LearnerStorage>(
    storage: &S,
    params: LearnerParams,
) -> Result<AdminResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;

    let mut learner = storage.get_learner(&learner_id)?;
    progress::reset_progress(&mut learner);
    storage.save_learner(&learner)?;

    tracing::warn!("Reset chapter progress for learner {}", learner.id);
    Ok(snapshot(&learner))
}

/// Reset a learner's streak to the never-active state (progress untouched)
pub fn reset_streak<S: LearnerStorage>(
    storage: &S,
    params: LearnerParams,
) -> Result<AdminResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;

    let mut learner = storage.get_learner(&learner_id)?;
    streak::reset_streak(&mut learner);
    storage.save_learner(&learner)?;

    tracing::warn!("Reset streak for learner {}", learner.id);
    Ok(snapshot(&learner))
}

/// Complete every chapter from 1 through the given one
///
/// Capped at MAX_BULK_CHAPTER; larger ids are rejected before any mutation.
pub fn complete_up_to<S: LearnerStorage>(
    storage: &S,
    params: CompleteUpToParams,
) -> Result<AdminResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;
    let chapter = ChapterId::new(params.chapter_id)?;

    if chapter.get() > MAX_BULK_CHAPTER {
        return Err(ServiceError::InvalidArgument(DomainError::InvalidChapterId(
            format!("bulk completion is capped at chapter {}", MAX_BULK_CHAPTER),
        )));
    }

    let mut learner = storage.get_learner(&learner_id)?;
    progress::complete_up_to(&mut learner, chapter);
    storage.save_learner(&learner)?;

    tracing::warn!(
        "Bulk-completed chapters 1..={} for learner {}",
        chapter,
        learner.id
    );
    Ok(snapshot(&learner))
}

/// Remove a learner's record entirely (account deletion boundary)
pub fn withdraw_learner<S: LearnerStorage>(
    storage: &S,
    params: LearnerParams,
) -> Result<(), ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;
    storage.delete_learner(&learner_id)?;

    tracing::warn!("Withdrew learner {}", learner_id);
    Ok(())
}
