//! Integration tests for nudge selection through the tracker.

use chrono::{DateTime, FixedOffset, TimeZone};
use pillarwise_core::{Config, Database, NewActivityLog, Pillar, Tracker};

fn local(d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, d, h, 0, 0)
        .unwrap()
}

fn log_all(tracker: &mut Tracker, entries: &[(Pillar, f64)], at: DateTime<FixedOffset>) {
    for (pillar, value) in entries {
        tracker
            .record(NewActivityLog::new("local", *pillar, *value, at), at.date_naive())
            .unwrap();
    }
}

#[test]
fn test_near_completion_names_missing_pillar() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config);
    log_all(
        &mut tracker,
        &[
            (Pillar::Cardio, 80.0),
            (Pillar::Strength, 3.0),
            (Pillar::Sleep, 49.0),
            (Pillar::CleanEating, 5.0),
            (Pillar::Mindfulness, 70.0),
        ],
        local(13, 7),
    );

    let nudge = tracker.nudge(local(14, 13)).unwrap().unwrap();
    assert_eq!(nudge.id, "near_completion");
    assert_eq!(nudge.priority, 0);
    assert_eq!(nudge.pillar, Some(Pillar::Cardio));
    assert!(nudge.message.contains("70 more minutes"), "{}", nudge.message);
}

#[test]
fn test_deadline_beats_stagnation_until_ratio_raised() {
    let db = Database::open_memory().unwrap();
    let at = local(16, 9);
    let friday_evening = local(16, 16);

    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config);
    log_all(&mut tracker, &[(Pillar::Cardio, 30.0)], at);
    let nudge = tracker.nudge(friday_evening).unwrap().unwrap();
    assert_eq!(nudge.id, "deadline_risk");
    assert_eq!(nudge.pillar, Some(Pillar::Cardio));
    assert!(nudge.message.starts_with("3 days left"), "{}", nudge.message);

    let mut relaxed = Config::default();
    relaxed.apply("nudges.deadline_gap_ratio", "0.9").unwrap();
    let tracker = Tracker::new(&db, &relaxed);
    let nudge = tracker.nudge(friday_evening).unwrap().unwrap();
    assert_eq!(nudge.id, "stagnation");
    assert_eq!(nudge.pillar, Some(Pillar::Strength));
}

#[test]
fn test_disabled_nudges_return_none() {
    let db = Database::open_memory().unwrap();
    let mut config = Config::default();
    config.apply("nudges.enabled", "false").unwrap();
    let tracker = Tracker::new(&db, &config);
    assert!(tracker.nudge(local(16, 9)).unwrap().is_none());
}

#[test]
fn test_empty_week_never_suggests_near_completion() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let tracker = Tracker::new(&db, &config);

    for day in 12..=18 {
        for hour in [0, 7, 12, 18, 22] {
            if let Some(nudge) = tracker.nudge(local(day, hour)).unwrap() {
                assert_ne!(nudge.id, "near_completion");
                assert_ne!(nudge.id, "deadline_risk");
                assert_ne!(nudge.id, "all_complete");
            }
        }
    }
}

#[test]
fn test_same_inputs_same_nudge() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config);
    log_all(&mut tracker, &[(Pillar::Sleep, 7.0)], local(15, 7));

    let now = local(15, 8);
    let first = tracker.nudge(now).unwrap();
    let second = tracker.nudge(now).unwrap();
    assert_eq!(first, second);
}
