//! Read queries and the write hook over a [`Database`], wired to [`Config`].
//!
//! This is the surface the CLI drives: record an activity and collect any
//! celebrations, and answer progress/streak/milestone/nudge queries for the
//! configured user.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityLog, NewActivityLog};
use crate::adherence::{
    check_window, coverage_trend, longest_streak, reached, streak, unseen_milestone, Milestone,
    WeekCoverage, WeeklySummary,
};
use crate::celebration::{AllFiveLatch, CelebrationEvent, CelebrationTrigger};
use crate::error::Result;
use crate::nudge::{Nudge, NudgeEngine};
use crate::seen_store::{all_seen, mark_seen};
use crate::storage::{Config, Database, DbSeenStore, LogStore};
use crate::week::{week_start, WeekKey};

const LATCH_KEY: &str = "celebration.all_five_latch";

/// Result of recording one activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordOutcome {
    pub entry: ActivityLog,
    pub celebrations: Vec<CelebrationEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakReport {
    pub current: u32,
    pub longest: u32,
    pub threshold: u8,
    pub weeks_considered: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneStatus {
    #[serde(flatten)]
    pub milestone: Milestone,
    pub reached: bool,
    pub seen: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilestoneReport {
    pub streak: u32,
    pub unseen: Option<Milestone>,
    pub catalog: Vec<MilestoneStatus>,
}

/// Query and write-hook facade for one configured user.
pub struct Tracker<'a> {
    db: &'a Database,
    config: &'a Config,
    trigger: CelebrationTrigger,
}

impl<'a> Tracker<'a> {
    pub fn new(db: &'a Database, config: &'a Config) -> Self {
        let trigger = CelebrationTrigger::new()
            .with_streak_threshold(config.tracking.near_perfect_threshold)
            .with_latch(load_latch(db));
        Self {
            db,
            config,
            trigger,
        }
    }

    /// Replace the milestone catalog (tests, seasonal catalogs).
    pub fn with_catalog(mut self, catalog: Vec<Milestone>) -> Self {
        self.trigger = self.trigger.with_catalog(catalog);
        self
    }

    pub fn user_id(&self) -> &str {
        &self.config.tracking.user_id
    }

    fn threshold(&self) -> u8 {
        self.config.tracking.near_perfect_threshold
    }

    /// Configured history window, re-checked since config fields are public.
    fn weeks(&self) -> Result<usize> {
        Ok(check_window(self.config.tracking.history_weeks)?)
    }

    /// Validate, persist and run the celebration checks for one entry.
    ///
    /// `today` comes from the clock and decides which week is active; only
    /// a write into that week can fire the all-five celebration.
    ///
    /// # Errors
    /// Returns validation errors for bad input and storage errors when the
    /// write fails. Seen-store and latch failures are logged, not returned.
    pub fn record(&mut self, input: NewActivityLog, today: NaiveDate) -> Result<RecordOutcome> {
        let active_week = week_start(today);
        let entry = ActivityLog::record(input)?;

        let history = self.db.history(self.user_id(), active_week, self.weeks()?)?;
        self.db.insert(&entry)?;

        let mut seen = DbSeenStore::new(self.db, self.user_id().to_string());
        let celebrations = self.trigger.on_log_recorded(&history, &entry, &mut seen);
        if let Err(e) = save_latch(self.db, self.trigger.latch()) {
            tracing::warn!(error = %e, "failed to persist celebration latch");
        }

        Ok(RecordOutcome {
            entry,
            celebrations,
        })
    }

    pub fn edit(&self, id: &uuid::Uuid, value: f64) -> Result<ActivityLog> {
        self.db.update_value(self.user_id(), id, value)
    }

    pub fn delete(&self, id: &uuid::Uuid) -> Result<bool> {
        self.db.delete(self.user_id(), id)
    }

    pub fn entries(&self, week: WeekKey) -> Result<Vec<ActivityLog>> {
        self.db.entries_for_week(self.user_id(), week)
    }

    pub fn summary(&self, week: WeekKey) -> Result<WeeklySummary> {
        let week = week_start(week);
        let logs = self.entries(week)?;
        Ok(WeeklySummary::build(week, &logs))
    }

    pub fn streak(&self, today: NaiveDate) -> Result<StreakReport> {
        let history = self.db.history(self.user_id(), week_start(today), self.weeks()?)?;
        Ok(StreakReport {
            current: streak(&history, self.threshold()),
            longest: longest_streak(&history, self.threshold()),
            threshold: self.threshold(),
            weeks_considered: history.len(),
        })
    }

    /// # Errors
    /// Rejects windows outside `1..=MAX_HISTORY_WEEKS`.
    pub fn trend(&self, today: NaiveDate, weeks: usize) -> Result<Vec<WeekCoverage>> {
        let weeks = check_window(weeks)?;
        let history = self.db.history(self.user_id(), week_start(today), weeks)?;
        Ok(coverage_trend(&history))
    }

    /// Catalog with reached/seen flags and the milestone that would be shown.
    /// Read-only: nothing is marked seen.
    pub fn milestones(&self, today: NaiveDate) -> Result<MilestoneReport> {
        let history = self.db.history(self.user_id(), week_start(today), self.weeks()?)?;
        let current = streak(&history, self.threshold());
        let seen_store = DbSeenStore::new(self.db, self.user_id().to_string());
        let seen = all_seen(&seen_store);

        let catalog = self.trigger.catalog();
        let reached_ids: Vec<&str> = reached(catalog, current).map(|m| m.id.as_str()).collect();
        let statuses = catalog
            .iter()
            .map(|m| MilestoneStatus {
                milestone: m.clone(),
                reached: reached_ids.contains(&m.id.as_str()),
                seen: seen.contains(&m.id),
            })
            .collect();

        Ok(MilestoneReport {
            streak: current,
            unseen: unseen_milestone(catalog, current, &seen).cloned(),
            catalog: statuses,
        })
    }

    /// Record a milestone as shown. Returns whether the write was persisted.
    pub fn acknowledge_milestone(&self, id: &str) -> bool {
        let mut seen = DbSeenStore::new(self.db, self.user_id().to_string());
        mark_seen(&mut seen, id)
    }

    /// The nudge for `now`, or `None`.
    pub fn nudge(&self, now: DateTime<FixedOffset>) -> Result<Option<Nudge>> {
        let logs = self.entries(week_start(now.date_naive()))?;
        let engine = NudgeEngine::new().with_settings(self.config.nudges.clone());
        Ok(engine.generate(&logs, now))
    }
}

fn load_latch(db: &Database) -> AllFiveLatch {
    match db.kv_get(LATCH_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable celebration latch; resetting");
            AllFiveLatch::Idle
        }),
        Ok(None) => AllFiveLatch::Idle,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read celebration latch");
            AllFiveLatch::Idle
        }
    }
}

fn save_latch(db: &Database, latch: AllFiveLatch) -> Result<()> {
    let raw = serde_json::to_string(&latch)?;
    db.kv_set(LATCH_KEY, &raw)?;
    Ok(())
}
