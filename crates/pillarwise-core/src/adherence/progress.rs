//! Per-pillar weekly progress.
//!
//! Pure reducers over a set of entries. The caller picks the week; nothing
//! here filters by time.

use serde::{Deserialize, Serialize};

use crate::activity::ActivityLog;
use crate::pillar::Pillar;
use crate::week::WeekKey;

/// Derived progress for one pillar within one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPillarState {
    pub pillar: Pillar,
    pub current: f64,
    pub target: f64,
    pub met: bool,
}

impl WeeklyPillarState {
    /// Amount still needed to reach the target, never negative.
    pub fn remaining(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }

    /// Fraction of target reached, capped at 1.0.
    pub fn ratio(&self) -> f64 {
        if self.target <= 0.0 {
            return 1.0;
        }
        (self.current / self.target).min(1.0)
    }
}

/// Sum of logged values for `pillar`. Empty input yields 0.
pub fn progress(logs: &[ActivityLog], pillar: Pillar) -> f64 {
    logs.iter()
        .filter(|log| log.pillar == pillar)
        .map(|log| log.value)
        .sum()
}

pub fn met(logs: &[ActivityLog], pillar: Pillar) -> bool {
    progress(logs, pillar) >= pillar.target()
}

pub fn pillar_state(logs: &[ActivityLog], pillar: Pillar) -> WeeklyPillarState {
    let current = progress(logs, pillar);
    let target = pillar.target();
    WeeklyPillarState {
        pillar,
        current,
        target,
        met: current >= target,
    }
}

/// States for every pillar in canonical order.
pub fn pillar_states(logs: &[ActivityLog]) -> [WeeklyPillarState; 5] {
    Pillar::ALL.map(|pillar| pillar_state(logs, pillar))
}

/// Snapshot of one week, as shown on the progress screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: WeekKey,
    pub pillars: Vec<PillarProgress>,
    pub coverage: u8,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarProgress {
    #[serde(flatten)]
    pub state: WeeklyPillarState,
    pub unit: String,
    pub remaining: f64,
    pub ratio: f64,
}

impl WeeklySummary {
    pub fn build(week_start: WeekKey, logs: &[ActivityLog]) -> Self {
        let states = pillar_states(logs);
        let coverage = states.iter().filter(|s| s.met).count() as u8;
        let pillars = states
            .iter()
            .map(|state| PillarProgress {
                state: *state,
                unit: state.pillar.unit().to_string(),
                remaining: state.remaining(),
                ratio: state.ratio(),
            })
            .collect();

        Self {
            week_start,
            pillars,
            coverage,
            entry_count: logs.len(),
        }
    }
}
