//! Fixtures shared by unit tests.

use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use crate::activity::ActivityLog;
use crate::pillar::Pillar;
use crate::week::WeekKey;

pub fn monday(y: i32, m: u32, d: u32) -> WeekKey {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert!(crate::week::is_week_start(date), "{date} is not a Monday");
    date
}

/// Entry in the week of 2026-10-12.
pub fn entry(pillar: Pillar, value: f64) -> ActivityLog {
    entry_in(monday(2026, 10, 12), pillar, value)
}

pub fn entry_in(week: WeekKey, pillar: Pillar, value: f64) -> ActivityLog {
    let noon = week.and_hms_opt(12, 0, 0).unwrap();
    ActivityLog {
        id: Uuid::new_v4(),
        user_id: "test-user".into(),
        pillar,
        value,
        logged_at: Utc.from_utc_datetime(&noon),
        week_start: week,
        note: None,
    }
}

/// Every pillar exactly at target.
pub fn full_week_in(week: WeekKey) -> Vec<ActivityLog> {
    Pillar::ALL
        .into_iter()
        .map(|p| entry_in(week, p, p.target()))
        .collect()
}

pub fn full_week() -> Vec<ActivityLog> {
    full_week_in(monday(2026, 10, 12))
}

/// The first `met` pillars at target, the rest untouched.
pub fn week_with_coverage(week: WeekKey, met: usize) -> Vec<ActivityLog> {
    Pillar::ALL
        .into_iter()
        .take(met)
        .map(|p| entry_in(week, p, p.target()))
        .collect()
}
