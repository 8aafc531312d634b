//! Contextual nudges.
//!
//! A nudge is a single suggestion picked from a declarative rule catalog.
//! Each [`NudgeRule`] pairs a predicate with a builder and a fixed priority;
//! the engine evaluates every rule against the same [`NudgeContext`] and
//! keeps the most urgent match. Nothing here reads the clock or any global
//! state, so a given `(logs, now)` always yields the same nudge.

mod engine;
mod rules;

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

use crate::activity::ActivityLog;
use crate::adherence::{pillar_states, WeeklyPillarState};
use crate::pillar::Pillar;
use crate::week::days_remaining_in_week;

pub use engine::{generate_nudge, NudgeEngine};
pub use rules::default_rules;

/// A suggestion for display. Produced fresh on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nudge {
    pub id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NudgeAction>,
    /// Lower is more urgent
    pub priority: u8,
}

/// What tapping the nudge should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NudgeAction {
    LogPillar { pillar: Pillar },
    ReviewWeek,
    ViewProgress,
}

/// Thresholds used by the progress-gated rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NudgeSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Warn about untouched pillars once this many days (or fewer) remain
    #[serde(default = "default_stagnation_days")]
    pub stagnation_days: u32,
    /// Flag large gaps once this many days (or fewer) remain
    #[serde(default = "default_deadline_days")]
    pub deadline_days: u32,
    /// Gap, as a fraction of target, above which a started pillar is at risk
    #[serde(default = "default_deadline_gap_ratio")]
    pub deadline_gap_ratio: f64,
}

fn default_true() -> bool {
    true
}
fn default_stagnation_days() -> u32 {
    4
}
fn default_deadline_days() -> u32 {
    3
}
fn default_deadline_gap_ratio() -> f64 {
    0.5
}

impl Default for NudgeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            stagnation_days: default_stagnation_days(),
            deadline_days: default_deadline_days(),
            deadline_gap_ratio: default_deadline_gap_ratio(),
        }
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone)]
pub struct NudgeContext<'a> {
    /// Entries for the week containing `now`
    pub logs: &'a [ActivityLog],
    pub now: DateTime<FixedOffset>,
    pub states: [WeeklyPillarState; 5],
    pub coverage: u8,
    pub days_remaining: u32,
    pub settings: &'a NudgeSettings,
}

impl<'a> NudgeContext<'a> {
    pub fn new(
        logs: &'a [ActivityLog],
        now: DateTime<FixedOffset>,
        settings: &'a NudgeSettings,
    ) -> Self {
        let states = pillar_states(logs);
        let coverage = states.iter().filter(|s| s.met).count() as u8;
        Self {
            logs,
            now,
            states,
            coverage,
            days_remaining: days_remaining_in_week(now.date_naive()),
            settings,
        }
    }

    pub fn state(&self, pillar: Pillar) -> &WeeklyPillarState {
        // states are built from Pillar::ALL, so the index always matches
        &self.states[pillar as usize]
    }

    pub fn hour(&self) -> u32 {
        self.now.hour()
    }

    pub fn logged_today(&self, pillar: Pillar) -> bool {
        let today = self.now.date_naive();
        let offset = self.now.offset();
        self.logs
            .iter()
            .any(|log| log.pillar == pillar && log.logged_on(today, offset))
    }

    /// Below target and not yet logged today.
    pub fn needs_reminder(&self, pillar: Pillar) -> bool {
        !self.state(pillar).met && !self.logged_today(pillar)
    }
}

/// One entry of the nudge catalog.
#[derive(Clone, Copy)]
pub struct NudgeRule {
    pub id: &'static str,
    pub priority: u8,
    pub when: fn(&NudgeContext) -> bool,
    pub build: fn(&NudgeContext) -> Nudge,
}

impl NudgeRule {
    /// The rule's nudge if its predicate holds.
    pub fn evaluate(&self, ctx: &NudgeContext) -> Option<Nudge> {
        if !(self.when)(ctx) {
            return None;
        }
        let mut nudge = (self.build)(ctx);
        nudge.id = self.id.to_string();
        nudge.priority = self.priority;
        Some(nudge)
    }
}

impl std::fmt::Debug for NudgeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NudgeRule")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::entry;
    use chrono::TimeZone;

    fn friday_at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn context_derives_week_state() {
        let logs = vec![entry(Pillar::Cardio, 150.0), entry(Pillar::Sleep, 20.0)];
        let settings = NudgeSettings::default();
        let ctx = NudgeContext::new(&logs, friday_at(9), &settings);
        assert_eq!(ctx.coverage, 1);
        assert_eq!(ctx.days_remaining, 3);
        assert_eq!(ctx.state(Pillar::Sleep).current, 20.0);
        assert_eq!(ctx.state(Pillar::Mindfulness).pillar, Pillar::Mindfulness);
    }

    #[test]
    fn logged_today_compares_calendar_dates() {
        // fixture entries are logged Monday at noon
        let logs = vec![entry(Pillar::Cardio, 10.0)];
        let settings = NudgeSettings::default();
        let friday = NudgeContext::new(&logs, friday_at(9), &settings);
        assert!(!friday.logged_today(Pillar::Cardio));
        assert!(friday.needs_reminder(Pillar::Cardio));

        let monday = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 12, 18, 0, 0)
            .unwrap();
        let ctx = NudgeContext::new(&logs, monday, &settings);
        assert!(ctx.logged_today(Pillar::Cardio));
        assert!(!ctx.needs_reminder(Pillar::Cardio));
    }

    #[test]
    fn rule_evaluation_stamps_id_and_priority() {
        let rule = NudgeRule {
            id: "always",
            priority: 9,
            when: |_| true,
            build: |_| Nudge {
                id: String::new(),
                message: "hi".into(),
                pillar: None,
                action: None,
                priority: 0,
            },
        };
        let settings = NudgeSettings::default();
        let nudge = rule
            .evaluate(&NudgeContext::new(&[], friday_at(9), &settings))
            .unwrap();
        assert_eq!(nudge.id, "always");
        assert_eq!(nudge.priority, 9);
    }
}
