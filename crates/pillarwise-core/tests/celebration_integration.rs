//! Integration tests for the write hook.
//!
//! These drive the [`Tracker`] against a real SQLite file so the all-five
//! latch and seen milestones survive reopening the database.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use pillarwise_core::{
    week_start, ActivityLog, CelebrationEvent, Config, Database, LogStore, Milestone,
    NewActivityLog, Pillar, Tracker,
};

fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .unwrap()
}

fn catalog() -> Vec<Milestone> {
    [1, 2, 4, 8]
        .into_iter()
        .map(|n| Milestone::new(format!("m{n}"), n, format!("{n} weeks"), ""))
        .collect()
}

/// Insert a full week directly, bypassing the hook.
fn seed_full_week(db: &Database, user: &str, week: NaiveDate) {
    for pillar in Pillar::ALL {
        let at = local(2026, 1, 1, 12);
        let entry = ActivityLog::record(
            NewActivityLog::new(user, pillar, pillar.target(), at).for_week(week),
        )
        .unwrap();
        db.insert(&entry).unwrap();
    }
}

fn milestone_ids(events: &[CelebrationEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            CelebrationEvent::Milestone { milestone, .. } => Some(milestone.id.clone()),
            _ => None,
        })
        .collect()
}

fn all_five_count(events: &[CelebrationEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CelebrationEvent::AllFive { .. }))
        .count()
}

#[test]
fn test_all_five_fires_once_then_stays_quiet() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config).with_catalog(Vec::new());
    let now = local(2026, 10, 14, 18);
    let today = now.date_naive();

    for pillar in [Pillar::Cardio, Pillar::Strength, Pillar::Sleep, Pillar::CleanEating] {
        let out = tracker
            .record(NewActivityLog::new("local", pillar, pillar.target(), now), today)
            .unwrap();
        assert!(out.celebrations.is_empty());
    }

    let out = tracker
        .record(NewActivityLog::new("local", Pillar::Mindfulness, 70.0, now), today)
        .unwrap();
    assert_eq!(
        out.celebrations,
        vec![CelebrationEvent::AllFive {
            week_start: week_start(today)
        }]
    );

    let out = tracker
        .record(NewActivityLog::new("local", Pillar::Cardio, 20.0, now), today)
        .unwrap();
    assert!(out.celebrations.is_empty());
}

#[test]
fn test_all_five_fires_again_next_week() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config).with_catalog(Vec::new());

    for start in [local(2026, 10, 12, 9), local(2026, 10, 19, 9)] {
        let mut fired = 0;
        for pillar in Pillar::ALL {
            let out = tracker
                .record(
                    NewActivityLog::new("local", pillar, pillar.target(), start),
                    start.date_naive(),
                )
                .unwrap();
            fired += all_five_count(&out.celebrations);
        }
        assert_eq!(fired, 1, "week of {}", start.date_naive());
    }
}

#[test]
fn test_backfill_does_not_rearm_current_week() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config).with_catalog(Vec::new());
    let now = local(2026, 10, 14, 18);
    let today = now.date_naive();
    let mut fired = 0;

    for pillar in Pillar::ALL {
        let out = tracker
            .record(NewActivityLog::new("local", pillar, pillar.target(), now), today)
            .unwrap();
        fired += all_five_count(&out.celebrations);
    }
    assert_eq!(fired, 1);

    // completing an older week late is not a celebration either
    let earlier = week_start(today) - Duration::weeks(1);
    for pillar in Pillar::ALL {
        let out = tracker
            .record(
                NewActivityLog::new("local", pillar, pillar.target(), now).for_week(earlier),
                today,
            )
            .unwrap();
        fired += all_five_count(&out.celebrations);
    }
    assert_eq!(fired, 1);

    let cardio = tracker
        .entries(week_start(today))
        .unwrap()
        .into_iter()
        .find(|e| e.pillar == Pillar::Cardio)
        .unwrap();
    tracker.edit(&cardio.id, 0.0).unwrap();
    let out = tracker
        .record(NewActivityLog::new("local", Pillar::Cardio, 150.0, now), today)
        .unwrap();
    fired += all_five_count(&out.celebrations);
    assert_eq!(fired, 1);
    let relogged = out.entry.id;

    // same again from a fresh tracker reading the persisted latch
    let mut reopened = Tracker::new(&db, &config).with_catalog(Vec::new());
    let out = reopened
        .record(
            NewActivityLog::new("local", Pillar::Sleep, 1.0, now).for_week(earlier),
            today,
        )
        .unwrap();
    assert_eq!(all_five_count(&out.celebrations), 0);
    reopened.edit(&relogged, 0.0).unwrap();
    let out = reopened
        .record(NewActivityLog::new("local", Pillar::Cardio, 150.0, now), today)
        .unwrap();
    assert_eq!(all_five_count(&out.celebrations), 0);
}

#[test]
fn test_milestones_surface_highest_then_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pillarwise.db");
    let config = Config::default();
    let this_week = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();

    {
        let db = Database::open_at(&path).unwrap();
        for back in 1..=4 {
            seed_full_week(&db, "local", this_week - Duration::weeks(back));
        }

        // streak is 4 with nothing seen: the threshold-4 entry, not threshold-1
        let mut tracker = Tracker::new(&db, &config).with_catalog(catalog());
        let now = local(2026, 10, 13, 8);
        let out = tracker
            .record(NewActivityLog::new("local", Pillar::Sleep, 7.0, now), now.date_naive())
            .unwrap();
        assert_eq!(milestone_ids(&out.celebrations), vec!["m4"]);
        match &out.celebrations[0] {
            CelebrationEvent::Milestone {
                streak, recorded, ..
            } => {
                assert_eq!(*streak, 4);
                assert!(*recorded);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // reopened store: same streak yields nothing, lower thresholds stay buried
    let db = Database::open_at(&path).unwrap();
    let mut tracker = Tracker::new(&db, &config).with_catalog(catalog());
    let now = local(2026, 10, 15, 8);
    let out = tracker
        .record(NewActivityLog::new("local", Pillar::Sleep, 7.0, now), now.date_naive())
        .unwrap();
    assert!(out.celebrations.is_empty());
    let report = tracker.milestones(now.date_naive()).unwrap();
    assert_eq!(report.streak, 4);
    assert!(report.unseen.is_none());

    // four more full weeks: the streak reaches 8
    for back in 0..4 {
        seed_full_week(&db, "local", this_week + Duration::weeks(back));
    }
    let now = local(2026, 11, 10, 8);
    let out = tracker
        .record(NewActivityLog::new("local", Pillar::Sleep, 7.0, now), now.date_naive())
        .unwrap();
    assert_eq!(milestone_ids(&out.celebrations), vec!["m8"]);
}

#[test]
fn test_backfill_repairs_broken_streak() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config).with_catalog(catalog());
    let this_week = NaiveDate::from_ymd_opt(2026, 10, 12).unwrap();
    let gap = this_week - Duration::weeks(2);

    seed_full_week(&db, "local", this_week - Duration::weeks(1));
    seed_full_week(&db, "local", this_week - Duration::weeks(3));
    for pillar in [Pillar::Cardio, Pillar::Strength, Pillar::Sleep] {
        let entry = ActivityLog::record(
            NewActivityLog::new("local", pillar, pillar.target(), local(2026, 1, 1, 12))
                .for_week(gap),
        )
        .unwrap();
        db.insert(&entry).unwrap();
    }

    let today = local(2026, 10, 14, 9).date_naive();
    assert_eq!(tracker.streak(today).unwrap().current, 1);

    // bringing the gap week to 4/5 joins the two runs
    let now = local(2026, 10, 14, 9);
    let out = tracker
        .record(
            NewActivityLog::new("local", Pillar::CleanEating, 5.0, now).for_week(gap),
            today,
        )
        .unwrap();
    assert_eq!(tracker.streak(today).unwrap().current, 3);
    assert_eq!(all_five_count(&out.celebrations), 0);
    assert_eq!(milestone_ids(&out.celebrations), vec!["m2"]);
}

#[test]
fn test_rejected_entry_is_not_written() {
    let db = Database::open_memory().unwrap();
    let config = Config::default();
    let mut tracker = Tracker::new(&db, &config);
    let now = local(2026, 10, 14, 9);

    let err = tracker
        .record(NewActivityLog::new("local", Pillar::Cardio, -5.0, now), now.date_naive())
        .unwrap_err();
    assert!(err.to_string().contains("cardio"), "{err}");
    assert!(tracker.entries(week_start(now.date_naive())).unwrap().is_empty());
}
