/// Operation for enrolling a learner
///
/// Called once at account registration. The gateway owns credentials and
/// identity; this just creates the empty progress record.

use serde::{Deserialize, Serialize};

use crate::domain::{Learner, LearnerId};
use crate::service::ServiceError;
use crate::storage::LearnerStorage;

/// Parameters for enrolling a learner
#[derive(Debug, Deserialize)]
pub struct EnrollParams {
    /// Learner id issued by the account system; a fresh one is minted
    /// when omitted
    pub learner_id: Option<String>,
}

/// Response from enrolling a learner
#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub learner_id: String,
    pub current_streak: u32,
}

/// Create a fresh learner record (streak 0, never active, no chapters)
pub fn enroll_learner<S: LearnerStorage>(
    storage: &S,
    params: EnrollParams,
) -> Result<EnrollResponse, ServiceError> {
    let learner_id = match params.learner_id {
        Some(raw) => LearnerId::from_string(&raw)?,
        None => LearnerId::new(),
    };

    let learner = Learner::new(learner_id);
    storage.create_learner(&learner)?;

    tracing::info!("Enrolled learner {}", learner.id);

    Ok(EnrollResponse {
        learner_id: learner.id.to_string(),
        current_streak: learner.current_streak,
    })
}
