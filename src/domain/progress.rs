/// Chapter progression rules
///
/// Chapters form a strictly linear track: chapter n is unlocked iff n == 1
/// or chapter n-1 has been completed. These functions are pure state + query
/// logic over a Learner record; persistence belongs to the storage layer and
/// notification to the caller.

use serde::Serialize;

use crate::domain::{ChapterId, Learner};

/// Fact emitted by a progress mutation
///
/// The service layer forwards these to the gateway so the UI can react to
/// progress changes; the core does not manage subscriptions itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEvent {
    /// The chapter was added to the completed set
    Completed,
    /// The chapter was already in the completed set
    AlreadyCompleted,
}

/// Check whether a chapter is available to the learner
///
/// Chapter 1 is always unlocked; every later chapter unlocks when its
/// immediate predecessor is completed. No side effects.
pub fn is_unlocked(learner: &Learner, chapter: ChapterId) -> bool {
    match chapter.predecessor() {
        None => true,
        Some(prev) => learner.completed_chapters.contains(&prev.get()),
    }
}

/// Mark a chapter as completed
///
/// Idempotent: completing an already-completed chapter is a no-op. This does
/// NOT check that the chapter was unlocked first - the unlock rule only
/// gates the UI.
pub fn complete_chapter(learner: &mut Learner, chapter: ChapterId) -> ProgressEvent {
    if learner.completed_chapters.insert(chapter.get()) {
        ProgressEvent::Completed
    } else {
        ProgressEvent::AlreadyCompleted
    }
}

/// Snapshot of the completed chapters in ascending order
pub fn completed_chapters(learner: &Learner) -> Vec<u32> {
    learner.completed_chapters.iter().copied().collect()
}

/// The lowest chapter the learner has not completed yet
///
/// This is the next chapter the UI should steer the learner toward; it is
/// always unlocked by construction.
pub fn next_chapter(learner: &Learner) -> u32 {
    let mut candidate = 1;
    while learner.completed_chapters.contains(&candidate) {
        candidate += 1;
    }
    candidate
}

/// Complete every chapter from 1 up to and including the given one
///
/// Support/debug shortcut. Same membership semantics as repeated
/// complete_chapter calls.
pub fn complete_up_to(learner: &mut Learner, chapter: ChapterId) {
    for id in 1..=chapter.get() {
        learner.completed_chapters.insert(id);
    }
}

/// Clear all chapter progress
///
/// Administrative action. Does not touch the streak fields.
pub fn reset_progress(learner: &mut Learner) {
    learner.completed_chapters.clear();
}
