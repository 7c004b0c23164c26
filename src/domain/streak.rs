/// Daily streak engine
///
/// Maintains `current_streak` and `last_activity_at` on the learner record.
/// One rule, three branches, evaluated in this order:
///
/// 1. never active          -> streak = 1
/// 2. more than 24h elapsed -> streak = 1 (hard reset, wins over the
///                             calendar-day check near the boundary)
/// 3. later UTC calendar day -> streak + 1
/// 4. otherwise              -> streak unchanged (same day)
///
/// The branch order matters: a 25h gap from 23:00 to 00:00 two days later is
/// a reset even though the calendar day advanced.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::Learner;

/// Which branch of the streak rule fired
///
/// Forwarded to the gateway so the UI can celebrate an extension or show a
/// reset without diffing the before/after counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
    /// First-ever activity, streak started at 1
    Started,
    /// Activity on a later calendar day within the 24h window, streak + 1
    Extended,
    /// Activity on the same calendar day (or skewed clock), streak unchanged
    Held,
    /// More than 24 elapsed hours since the last activity, streak back to 1
    Reset,
}

/// Record a qualifying activity at the given instant
///
/// Mutates `current_streak` and `last_activity_at`. `now` earlier than the
/// recorded last activity is treated as clock skew: the record is left
/// completely untouched rather than moving `last_activity_at` backwards.
pub fn record_activity(learner: &mut Learner, now: DateTime<Utc>) -> StreakOutcome {
    let last = match learner.last_activity_at {
        None => {
            learner.current_streak = 1;
            learner.last_activity_at = Some(now);
            return StreakOutcome::Started;
        }
        Some(last) => last,
    };

    if now < last {
        // Clock skew, keep last_activity_at monotonic
        return StreakOutcome::Held;
    }

    let outcome = if now - last > Duration::hours(24) {
        learner.current_streak = 1;
        StreakOutcome::Reset
    } else if now.date_naive() > last.date_naive() {
        learner.current_streak += 1;
        StreakOutcome::Extended
    } else {
        StreakOutcome::Held
    };

    learner.last_activity_at = Some(now);
    outcome
}

/// Reset the streak to the never-active state
///
/// Administrative action: streak back to 0, last activity cleared. Chapter
/// progress is untouched.
pub fn reset_streak(learner: &mut Learner) {
    learner.current_streak = 0;
    learner.last_activity_at = None;
}
