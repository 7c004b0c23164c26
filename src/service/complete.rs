/// Operation for completing a chapter
///
/// Completion is the main lesson interaction: it adds the chapter to the
/// learner's completed set and counts as a qualifying activity for the
/// streak. Both mutations persist in one transactional save, so a failed
/// commit leaves neither applied.

use serde::{Deserialize, Serialize};

use crate::domain::{progress, streak, ChapterId, LearnerId, ProgressEvent, StreakOutcome};
use crate::service::{parse_occurred_at, ServiceError};
use crate::storage::LearnerStorage;

/// Parameters for completing a chapter
#[derive(Debug, Deserialize)]
pub struct CompleteChapterParams {
    pub learner_id: String,
    pub chapter_id: u32,
    /// When the completion happened (RFC 3339); defaults to now. The gateway
    /// stamps this at request acceptance so retries keep the original time.
    pub occurred_at: Option<String>,
}

/// Response from completing a chapter
#[derive(Debug, Serialize)]
pub struct CompleteChapterResponse {
    pub learner_id: String,
    pub chapter_id: u32,
    /// Whether this call changed the completed set (false on retry)
    pub newly_completed: bool,
    /// The chapter this completion unlocked, if it changed anything
    pub unlocked_chapter: Option<u32>,
    pub current_streak: u32,
    pub streak_outcome: StreakOutcome,
}

/// Mark a chapter completed and run the streak engine
///
/// Safe to retry: the completed set is idempotent and a same-day retry
/// holds the streak rather than double-counting it.
pub fn complete_chapter<S: LearnerStorage>(
    storage: &S,
    params: CompleteChapterParams,
) -> Result<CompleteChapterResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;
    let chapter = ChapterId::new(params.chapter_id)?;
    let now = parse_occurred_at(params.occurred_at)?;

    let mut learner = storage.get_learner(&learner_id)?;

    let event = progress::complete_chapter(&mut learner, chapter);
    let outcome = streak::record_activity(&mut learner, now);

    storage.save_learner(&learner)?;

    let newly_completed = event == ProgressEvent::Completed;
    // checked_add: chapter ids run all the way to u32::MAX, which has no
    // successor to unlock
    let unlocked_chapter = if newly_completed {
        chapter.get().checked_add(1)
    } else {
        None
    };

    tracing::info!(
        "Learner {} completed chapter {} (newly_completed={}, streak={})",
        learner.id,
        chapter,
        newly_completed,
        learner.current_streak
    );

    Ok(CompleteChapterResponse {
        learner_id: learner.id.to_string(),
        chapter_id: chapter.get(),
        newly_completed,
        unlocked_chapter,
        current_streak: learner.current_streak,
        streak_outcome: outcome,
    })
}
