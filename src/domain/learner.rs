/// Learner entity holding per-user progress and streak state
///
/// One record per user. Created at registration, mutated by chapter
/// completions and activity events, cleared by the administrative reset
/// actions. This is the only shared mutable state in the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::LearnerId;

/// A learner's persisted progress record
///
/// `completed_chapters` only grows in normal operation; `reset_progress`
/// clearing it is a distinct administrative action. `current_streak` is 0
/// only before the first activity or after a streak reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Learner {
    /// Identity resolved by the external auth collaborator
    pub id: LearnerId,
    /// Chapters this learner has finished, kept sorted for stable snapshots
    pub completed_chapters: BTreeSet<u32>,
    /// Consecutive qualifying days, see the streak engine for the rules
    pub current_streak: u32,
    /// Instant of the last activity that affected the streak; None means
    /// never active
    pub last_activity_at: Option<DateTime<Utc>>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Learner {
    /// Create a fresh learner record at registration time
    pub fn new(id: LearnerId) -> Self {
        Self {
            id,
            completed_chapters: BTreeSet::new(),
            current_streak: 0,
            last_activity_at: None,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a learner from persisted data (used by the storage layer)
    pub fn from_existing(
        id: LearnerId,
        completed_chapters: BTreeSet<u32>,
        current_streak: u32,
        last_activity_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            completed_chapters,
            current_streak,
            last_activity_at,
            created_at,
        }
    }

    /// Whether this learner has ever performed a qualifying activity
    pub fn has_been_active(&self) -> bool {
        self.last_activity_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_learner_starts_empty() {
        let learner = Learner::new(LearnerId::new());

        assert!(learner.completed_chapters.is_empty());
        assert_eq!(learner.current_streak, 0);
        assert_eq!(learner.last_activity_at, None);
        assert!(!learner.has_been_active());
    }
}
