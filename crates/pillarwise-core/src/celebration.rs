//! One-shot celebrations fired by new log writes.
//!
//! Two independent checks run after every successful write, in order:
//!
//! 1. **All five met**: the write moves the active week from fewer than five
//!    met pillars to all five. A per-week latch keeps this from re-firing
//!    for the rest of that week. The latch resets only when the active week
//!    changes; backfills into earlier weeks never celebrate or reset it.
//! 2. **Milestone**: the streak over the updated history reaches an unseen
//!    milestone. The milestone is recorded in the seen-store before the event
//!    is returned.
//!
//! Both can fire for the same write; the caller sequences them.

use serde::{Deserialize, Serialize};

use crate::activity::ActivityLog;
use crate::adherence::{
    coverage, default_catalog, streak, unseen_milestone, Milestone, WeeklyHistory,
    DEFAULT_STREAK_THRESHOLD,
};
use crate::seen_store::{all_seen, mark_seen, SeenStore};
use crate::week::WeekKey;

/// Event emitted at most once per qualifying transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CelebrationEvent {
    AllFive {
        week_start: WeekKey,
    },
    Milestone {
        milestone: Milestone,
        streak: u32,
        /// False when the seen-store write failed and the milestone may show again
        recorded: bool,
    },
}

/// Latch state for the all-five celebration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AllFiveLatch {
    Idle,
    Fired { week_start: WeekKey },
}

impl AllFiveLatch {
    fn is_fired_for(&self, week: WeekKey) -> bool {
        matches!(self, AllFiveLatch::Fired { week_start } if *week_start == week)
    }
}

/// Watches log writes and emits celebrations.
#[derive(Debug, Clone)]
pub struct CelebrationTrigger {
    catalog: Vec<Milestone>,
    streak_threshold: u8,
    latch: AllFiveLatch,
}

impl CelebrationTrigger {
    /// Trigger with the default milestone catalog and streak threshold.
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
            streak_threshold: DEFAULT_STREAK_THRESHOLD,
            latch: AllFiveLatch::Idle,
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<Milestone>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_streak_threshold(mut self, threshold: u8) -> Self {
        self.streak_threshold = threshold;
        self
    }

    /// Restore a latch persisted by an earlier session.
    pub fn with_latch(mut self, latch: AllFiveLatch) -> Self {
        self.latch = latch;
        self
    }

    pub fn latch(&self) -> AllFiveLatch {
        self.latch
    }

    pub fn catalog(&self) -> &[Milestone] {
        &self.catalog
    }

    /// Drop the latch if it belongs to a week other than `active_week`.
    pub fn roll_over(&mut self, active_week: WeekKey) {
        if let AllFiveLatch::Fired { week_start } = self.latch {
            if week_start != active_week {
                tracing::debug!(%week_start, %active_week, "celebration latch reset");
                self.latch = AllFiveLatch::Idle;
            }
        }
    }

    /// All-five check alone. `previous` is the active week before the write.
    ///
    /// Only writes into `active_week` can celebrate; a backfill into an
    /// earlier week leaves the latch untouched.
    pub fn check_all_five(
        &mut self,
        active_week: WeekKey,
        previous: &[ActivityLog],
        new_log: &ActivityLog,
    ) -> Option<CelebrationEvent> {
        self.roll_over(active_week);
        let week = new_log.week_start;
        if week != active_week {
            tracing::debug!(%week, %active_week, "write outside active week; all-five check skipped");
            return None;
        }

        let before = coverage(previous);
        let mut updated = previous.to_vec();
        updated.push(new_log.clone());
        let after = coverage(&updated);

        if before < 5 && after == 5 && !self.latch.is_fired_for(week) {
            self.latch = AllFiveLatch::Fired { week_start: week };
            tracing::info!(%week, "all five pillars met");
            return Some(CelebrationEvent::AllFive { week_start: week });
        }
        None
    }

    /// Milestone check alone, over history that already includes the write.
    pub fn check_milestone(
        &self,
        updated: &WeeklyHistory,
        seen: &mut dyn SeenStore,
    ) -> Option<CelebrationEvent> {
        let streak = streak(updated, self.streak_threshold);
        let seen_ids = all_seen(&*seen);
        let milestone = unseen_milestone(&self.catalog, streak, &seen_ids)?.clone();

        let recorded = mark_seen(seen, &milestone.id);
        tracing::info!(milestone = %milestone.id, streak, recorded, "milestone reached");
        Some(CelebrationEvent::Milestone {
            milestone,
            streak,
            recorded,
        })
    }

    /// Run both checks for a write of `new_log` on top of `history`.
    ///
    /// `history` must reflect the store *before* the write; its current week
    /// is the active week.
    pub fn on_log_recorded(
        &mut self,
        history: &WeeklyHistory,
        new_log: &ActivityLog,
        seen: &mut dyn SeenStore,
    ) -> Vec<CelebrationEvent> {
        let mut events = Vec::new();

        if let Some(event) = self.check_all_five(history.current_week(), history.week(0), new_log) {
            events.push(event);
        }

        let updated = history.with_entry(new_log.clone());
        if let Some(event) = self.check_milestone(&updated, seen) {
            events.push(event);
        }

        events
    }
}

impl Default for CelebrationTrigger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillar::Pillar;
    use crate::seen_store::broken::BrokenSeenStore;
    use crate::seen_store::{is_seen, MemorySeenStore};
    use crate::testing::{entry_in, full_week_in, monday, week_with_coverage};
    use crate::week::weeks_before;

    fn no_milestones() -> CelebrationTrigger {
        CelebrationTrigger::new().with_catalog(Vec::new())
    }

    #[test]
    fn all_five_fires_once_per_week() {
        let week = monday(2026, 10, 12);
        let history = WeeklyHistory::from_entries(week, 4, week_with_coverage(week, 4));
        let mut trigger = no_milestones();
        let mut seen = MemorySeenStore::new();

        let finishing = entry_in(week, Pillar::Mindfulness, 70.0);
        let events = trigger.on_log_recorded(&history, &finishing, &mut seen);
        assert_eq!(events, vec![CelebrationEvent::AllFive { week_start: week }]);

        let history = history.with_entry(finishing);
        let extra = entry_in(week, Pillar::Cardio, 20.0);
        assert!(trigger.on_log_recorded(&history, &extra, &mut seen).is_empty());
    }

    #[test]
    fn latch_survives_dropping_below_five_and_recovering() {
        let week = monday(2026, 10, 12);
        let mut trigger = no_milestones().with_latch(AllFiveLatch::Fired { week_start: week });
        let previous = week_with_coverage(week, 4);
        let finishing = entry_in(week, Pillar::Mindfulness, 70.0);
        assert!(trigger.check_all_five(week, &previous, &finishing).is_none());
    }

    #[test]
    fn latch_resets_on_new_week() {
        let last = monday(2026, 10, 5);
        let this = monday(2026, 10, 12);
        let mut trigger = no_milestones().with_latch(AllFiveLatch::Fired { week_start: last });

        let previous = week_with_coverage(this, 4);
        let finishing = entry_in(this, Pillar::Mindfulness, 70.0);
        assert_eq!(
            trigger.check_all_five(this, &previous, &finishing),
            Some(CelebrationEvent::AllFive { week_start: this })
        );
        assert_eq!(trigger.latch(), AllFiveLatch::Fired { week_start: this });
    }

    #[test]
    fn backfill_keeps_active_week_latch() {
        let last = monday(2026, 10, 5);
        let this = monday(2026, 10, 12);
        let fired = AllFiveLatch::Fired { week_start: this };
        let mut trigger = no_milestones().with_latch(fired);

        // completing last week late neither celebrates nor clears this week
        let previous = week_with_coverage(last, 4);
        let finishing = entry_in(last, Pillar::Mindfulness, 70.0);
        assert!(trigger.check_all_five(this, &previous, &finishing).is_none());
        assert_eq!(trigger.latch(), fired);

        let previous = week_with_coverage(this, 4);
        let finishing = entry_in(this, Pillar::Mindfulness, 70.0);
        assert!(trigger.check_all_five(this, &previous, &finishing).is_none());
    }

    #[test]
    fn backfill_through_hook_skips_all_five() {
        let this = monday(2026, 10, 12);
        let last = weeks_before(this, 1);
        let history = WeeklyHistory::from_entries(this, 4, week_with_coverage(last, 4));
        let mut trigger = no_milestones();
        let mut seen = MemorySeenStore::new();

        let events =
            trigger.on_log_recorded(&history, &entry_in(last, Pillar::Mindfulness, 70.0), &mut seen);
        assert!(events.is_empty());
        assert_eq!(trigger.latch(), AllFiveLatch::Idle);
    }

    #[test]
    fn no_event_when_already_at_five_before_write() {
        let week = monday(2026, 10, 12);
        let mut trigger = no_milestones();
        let previous = full_week_in(week);
        assert!(trigger
            .check_all_five(week, &previous, &entry_in(week, Pillar::Sleep, 7.0))
            .is_none());
        assert_eq!(trigger.latch(), AllFiveLatch::Idle);
    }

    #[test]
    fn no_event_when_write_does_not_complete_week() {
        let week = monday(2026, 10, 12);
        let mut trigger = no_milestones();
        let previous = week_with_coverage(week, 3);
        assert!(trigger
            .check_all_five(week, &previous, &entry_in(week, Pillar::CleanEating, 5.0))
            .is_none());
    }

    #[test]
    fn milestone_fires_once_and_is_recorded() {
        let current = monday(2026, 10, 12);
        let mut entries = Vec::new();
        for offset in 1..=3 {
            entries.extend(full_week_in(weeks_before(current, offset)));
        }
        entries.extend(week_with_coverage(current, 3));
        let history = WeeklyHistory::from_entries(current, 8, entries);
        let catalog: Vec<_> = [1, 2, 4, 8]
            .into_iter()
            .map(|t| Milestone::new(format!("m{t}"), t, "", ""))
            .collect();
        let mut trigger = CelebrationTrigger::new().with_catalog(catalog);
        let mut seen = MemorySeenStore::new();

        // fourth pillar this week brings coverage to 4, streak to 4
        let log = entry_in(current, Pillar::CleanEating, 5.0);
        let events = trigger.on_log_recorded(&history, &log, &mut seen);
        assert_eq!(events.len(), 1);
        match &events[0] {
            CelebrationEvent::Milestone {
                milestone,
                streak,
                recorded,
            } => {
                assert_eq!(milestone.id, "m4");
                assert_eq!(*streak, 4);
                assert!(recorded);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(is_seen(&seen, "m4"));

        let history = history.with_entry(log);
        let again = entry_in(current, Pillar::Cardio, 1.0);
        assert!(trigger.on_log_recorded(&history, &again, &mut seen).is_empty());
    }

    #[test]
    fn both_events_can_fire_for_one_write() {
        let current = monday(2026, 10, 12);
        let history =
            WeeklyHistory::from_entries(current, 4, week_with_coverage(current, 4));
        let mut trigger = CelebrationTrigger::new();
        let mut seen = MemorySeenStore::new();

        // the current week qualifies for the streak, so streak_1 fires
        // alongside the all-five event
        let events =
            trigger.on_log_recorded(&history, &entry_in(current, Pillar::Mindfulness, 70.0), &mut seen);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], CelebrationEvent::AllFive { .. }));
        assert!(matches!(events[1], CelebrationEvent::Milestone { .. }));
    }

    #[test]
    fn broken_seen_store_still_celebrates() {
        let current = monday(2026, 10, 12);
        let history = WeeklyHistory::from_entries(current, 2, full_week_in(weeks_before(current, 1)));
        let trigger = CelebrationTrigger::new();
        let mut store = BrokenSeenStore;
        let event = trigger.check_milestone(&history, &mut store).unwrap();
        assert!(matches!(
            event,
            CelebrationEvent::Milestone { recorded: false, .. }
        ));
    }
}
