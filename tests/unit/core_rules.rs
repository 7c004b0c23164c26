/// Unit tests for the progression and streak rules through the public API
use chrono::{DateTime, TimeZone, Utc};
use signbuddy_progress::*;

fn learner() -> Learner {
    Learner::new(LearnerId::new())
}

fn chapter(n: u32) -> ChapterId {
    ChapterId::new(n).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

#[test]
fn unlock_monotonicity() {
    let mut l = learner();

    // Chapter 1 is always unlocked
    assert!(progress::is_unlocked(&l, chapter(1)));

    // For n >= 2, unlocked iff n-1 is completed
    for n in 2..=10u32 {
        assert!(!progress::is_unlocked(&l, chapter(n)));
    }

    progress::complete_chapter(&mut l, chapter(1));
    assert!(progress::is_unlocked(&l, chapter(2)));
    assert!(!progress::is_unlocked(&l, chapter(3)));
}

#[test]
fn completion_idempotence() {
    let mut l = learner();

    progress::complete_chapter(&mut l, chapter(2));
    let once = l.completed_chapters.clone();

    progress::complete_chapter(&mut l, chapter(2));
    assert_eq!(l.completed_chapters, once);
}

#[test]
fn streak_first_activity() {
    let mut l = learner();
    let t = at(2024, 1, 1, 9, 0);

    streak::record_activity(&mut l, t);

    assert_eq!(l.current_streak, 1);
    assert_eq!(l.last_activity_at, Some(t));
}

#[test]
fn streak_same_day_noop() {
    let mut l = learner();
    streak::record_activity(&mut l, at(2024, 1, 1, 9, 0));
    streak::record_activity(&mut l, at(2024, 1, 1, 20, 0));

    assert_eq!(l.current_streak, 1);
}

#[test]
fn streak_next_day_increment() {
    // 23:00 day D then 01:00 day D+1: only two hours apart but a new day
    let mut l = learner();
    streak::record_activity(&mut l, at(2024, 1, 1, 23, 0));
    streak::record_activity(&mut l, at(2024, 1, 2, 1, 0));

    assert_eq!(l.current_streak, 2);
}

#[test]
fn streak_hard_reset_dominates_day_change() {
    let mut l = learner();
    streak::record_activity(&mut l, at(2024, 1, 1, 9, 0));
    streak::record_activity(&mut l, at(2024, 1, 2, 8, 0));
    streak::record_activity(&mut l, at(2024, 1, 3, 7, 0));
    assert_eq!(l.current_streak, 3);

    // 26 hours later: reset to 1 even though the day also advanced
    streak::record_activity(&mut l, at(2024, 1, 4, 9, 0));
    assert_eq!(l.current_streak, 1);
}

#[test]
fn resets_clear_their_own_state_only() {
    let mut l = learner();
    progress::complete_up_to(&mut l, chapter(4));
    streak::record_activity(&mut l, at(2024, 1, 1, 9, 0));

    progress::reset_progress(&mut l);
    assert!(progress::completed_chapters(&l).is_empty());
    assert_eq!(l.current_streak, 1);

    streak::reset_streak(&mut l);
    assert_eq!(l.current_streak, 0);
    assert_eq!(l.last_activity_at, None);
}

#[test]
fn complete_up_to_equivalence() {
    let mut bulk = learner();
    progress::complete_up_to(&mut bulk, chapter(5));

    let mut sequential = learner();
    for n in 1..=5 {
        progress::complete_chapter(&mut sequential, chapter(n));
    }

    assert_eq!(bulk.completed_chapters, sequential.completed_chapters);
    assert_eq!(progress::completed_chapters(&bulk), vec![1, 2, 3, 4, 5]);
}

#[test]
fn registration_login_scenario() {
    // Register -> first login -> same-day login -> 37h-gap login
    let mut l = learner();
    assert_eq!(l.current_streak, 0);
    assert_eq!(l.last_activity_at, None);

    streak::record_activity(&mut l, at(2024, 1, 1, 9, 0));
    assert_eq!(l.current_streak, 1);

    streak::record_activity(&mut l, at(2024, 1, 1, 20, 0));
    assert_eq!(l.current_streak, 1);

    streak::record_activity(&mut l, at(2024, 1, 3, 9, 0));
    assert_eq!(l.current_streak, 1);
}

#[test]
fn chapter_id_zero_is_rejected() {
    assert!(ChapterId::new(0).is_err());
}
