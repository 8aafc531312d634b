//! Monday-aligned week keys.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The Monday that identifies a calendar week.
pub type WeekKey = NaiveDate;

/// Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> WeekKey {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn is_week_start(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Days left in the week including `date` itself: Monday 7, Sunday 1.
pub fn days_remaining_in_week(date: NaiveDate) -> u32 {
    8 - date.weekday().number_from_monday()
}

/// Whole weeks between `week` and `current`; 0 for the current week,
/// negative for weeks in the future.
pub fn week_offset(current: WeekKey, week: WeekKey) -> i64 {
    (week_start(current) - week_start(week)).num_days() / 7
}

/// Week key `offset` weeks before `current`.
pub fn weeks_before(current: WeekKey, offset: u32) -> WeekKey {
    week_start(current) - Duration::weeks(offset as i64)
}
