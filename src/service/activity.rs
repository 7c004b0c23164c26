/// Operation for recording a qualifying activity
///
/// The gateway forwards explicit lesson interactions here (lesson opened,
/// practice session finished). Passive reads never arrive at this
/// operation, so browsing the dictionary does not keep a streak alive.

use serde::{Deserialize, Serialize};

use crate::domain::{streak, LearnerId, StreakOutcome};
use crate::service::{parse_occurred_at, ServiceError};
use crate::storage::LearnerStorage;

/// Parameters for recording an activity
#[derive(Debug, Deserialize)]
pub struct RecordActivityParams {
    pub learner_id: String,
    /// When the activity happened (RFC 3339); defaults to now
    pub occurred_at: Option<String>,
}

/// Response from recording an activity
#[derive(Debug, Serialize)]
pub struct RecordActivityResponse {
    pub learner_id: String,
    pub current_streak: u32,
    pub streak_outcome: StreakOutcome,
    pub last_activity_at: Option<String>,
}

/// Run the streak engine for one activity event
pub fn record_activity<S: LearnerStorage>(
    storage: &S,
    params: RecordActivityParams,
) -> Result<RecordActivityResponse, ServiceError> {
    let learner_id = LearnerId::from_string(&params.learner_id)?;
    let now = parse_occurred_at(params.occurred_at)?;

    let mut learner = storage.get_learner(&learner_id)?;
    let outcome = streak::record_activity(&mut learner, now);
    storage.save_learner(&learner)?;

    tracing::info!(
        "Learner {} activity: {:?}, streak={}",
        learner.id,
        outcome,
        learner.current_streak
    );

    Ok(RecordActivityResponse {
        learner_id: learner.id.to_string(),
        current_streak: learner.current_streak,
        streak_outcome: outcome,
        last_activity_at: learner.last_activity_at.map(|t| t.to_rfc3339()),
    })
}
