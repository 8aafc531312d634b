//! Consecutive-week streaks.
//!
//! A week qualifies when its coverage reaches the near-perfect threshold.
//! The current week is still accruing logs, so falling short there does not
//! break the streak; it simply isn't counted. Any fully elapsed week that
//! falls short ends the walk.

use super::history::WeeklyHistory;

/// Default coverage a week needs to count toward the streak.
pub const DEFAULT_STREAK_THRESHOLD: u8 = 4;

/// Streak length from per-week coverages, offset 0 (current week) first.
pub fn streak_from_coverages(coverages: &[u8], threshold: u8) -> u32 {
    let mut streak = 0;
    for (offset, coverage) in coverages.iter().enumerate() {
        if *coverage < threshold {
            if offset == 0 {
                continue;
            }
            tracing::debug!(offset, coverage, streak, "streak walk stopped");
            break;
        }
        streak += 1;
    }
    streak
}

/// Current streak walking backward from the current week.
pub fn streak(history: &WeeklyHistory, threshold: u8) -> u32 {
    streak_from_coverages(&history.coverages(), threshold)
}

/// Longest qualifying run anywhere in the window. The current week only
/// contributes once it qualifies.
pub fn longest_streak(history: &WeeklyHistory, threshold: u8) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for (offset, coverage) in history.coverages().into_iter().enumerate() {
        if coverage >= threshold {
            run += 1;
            longest = longest.max(run);
        } else if offset > 0 {
            run = 0;
        }
    }
    longest
}
