/// Core identifier types used throughout the domain layer
///
/// This module defines the LearnerId and ChapterId wrappers used by the
/// Learner record, the progress rules, and the storage layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a learner
///
/// This is a wrapper around UUID to provide type safety - the id is resolved
/// by the external auth collaborator and passed in with every request; the
/// core never mints one except at enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LearnerId(pub Uuid);

impl LearnerId {
    /// Generate a new random learner ID (used at enrollment)
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a learner ID from its string form (boundary input, database rows)
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| DomainError::InvalidLearnerId(s.to_string()))
    }
}

impl Default for LearnerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LearnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated chapter identifier
///
/// Chapters are strictly linear and identified by positive integers starting
/// at 1. The constructor rejects 0 rather than clamping, so a bad id can
/// never silently complete chapter 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChapterId(u32);

impl ChapterId {
    /// The first chapter, always unlocked
    pub const FIRST: ChapterId = ChapterId(1);

    /// Validate and wrap a raw chapter number
    pub fn new(raw: u32) -> Result<Self, DomainError> {
        if raw == 0 {
            return Err(DomainError::InvalidChapterId(
                "chapter ids start at 1".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// The raw chapter number
    pub fn get(&self) -> u32 {
        self.0
    }

    /// The chapter that must be completed before this one unlocks
    ///
    /// Returns None for chapter 1, which has no prerequisite.
    pub fn predecessor(&self) -> Option<ChapterId> {
        if self.0 == 1 {
            None
        } else {
            Some(ChapterId(self.0 - 1))
        }
    }
}

impl std::fmt::Display for ChapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_id_rejects_zero() {
        assert!(ChapterId::new(0).is_err());
        assert!(ChapterId::new(1).is_ok());
    }

    #[test]
    fn test_chapter_predecessor() {
        assert_eq!(ChapterId::FIRST.predecessor(), None);
        let ch3 = ChapterId::new(3).unwrap();
        assert_eq!(ch3.predecessor(), Some(ChapterId::new(2).unwrap()));
    }

    #[test]
    fn test_learner_id_round_trip() {
        let id = LearnerId::new();
        let parsed = LearnerId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_learner_id_rejects_garbage() {
        assert!(LearnerId::from_string("not-a-uuid").is_err());
    }
}
