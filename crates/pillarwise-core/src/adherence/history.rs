//! Entries bucketed by week offset from the current week.

use crate::activity::ActivityLog;
use crate::error::ValidationError;
use crate::week::{week_offset, week_start, weeks_before, WeekKey};

use super::coverage::coverage;

/// Longest history window, ten years of weeks.
pub const MAX_HISTORY_WEEKS: usize = 520;

/// Reject windows that are empty or longer than [`MAX_HISTORY_WEEKS`].
pub fn check_window(weeks: usize) -> Result<usize, ValidationError> {
    if (1..=MAX_HISTORY_WEEKS).contains(&weeks) {
        Ok(weeks)
    } else {
        Err(ValidationError::HistoryWindow {
            weeks,
            max: MAX_HISTORY_WEEKS,
        })
    }
}

/// Entry sets indexed by week offset. Offset 0 is the current week,
/// offset 1 the week before it, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyHistory {
    current_week: WeekKey,
    weeks: Vec<Vec<ActivityLog>>,
}

impl WeeklyHistory {
    /// Empty history covering `weeks` weeks ending at `current_week`.
    pub fn empty(current_week: WeekKey, weeks: usize) -> Self {
        Self {
            current_week: week_start(current_week),
            weeks: vec![Vec::new(); weeks.max(1)],
        }
    }

    /// Bucket `entries` by their week key. Entries from future weeks or
    /// older than the window are dropped.
    pub fn from_entries<I>(current_week: WeekKey, weeks: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = ActivityLog>,
    {
        let mut history = Self::empty(current_week, weeks);
        for entry in entries {
            history.push(entry);
        }
        history
    }

    /// Build from pre-bucketed sets, offset 0 first.
    pub fn from_weeks(current_week: WeekKey, weeks: Vec<Vec<ActivityLog>>) -> Self {
        let mut weeks = weeks;
        if weeks.is_empty() {
            weeks.push(Vec::new());
        }
        Self {
            current_week: week_start(current_week),
            weeks,
        }
    }

    /// Add one entry to its bucket. Returns false if it falls outside the window.
    pub fn push(&mut self, entry: ActivityLog) -> bool {
        let offset = week_offset(self.current_week, entry.week_start);
        if offset < 0 || offset as usize >= self.weeks.len() {
            return false;
        }
        self.weeks[offset as usize].push(entry);
        true
    }

    /// Copy of this history with `entry` added.
    pub fn with_entry(&self, entry: ActivityLog) -> Self {
        let mut next = self.clone();
        next.push(entry);
        next
    }

    pub fn current_week(&self) -> WeekKey {
        self.current_week
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.iter().all(Vec::is_empty)
    }

    /// Entries for the week at `offset`; empty outside the window.
    pub fn week(&self, offset: usize) -> &[ActivityLog] {
        self.weeks.get(offset).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn week_key(&self, offset: usize) -> WeekKey {
        weeks_before(self.current_week, offset as u32)
    }

    /// Offset of `week` inside the window, if it is covered.
    pub fn offset_of(&self, week: WeekKey) -> Option<usize> {
        let offset = week_offset(self.current_week, week);
        (offset >= 0 && (offset as usize) < self.weeks.len()).then_some(offset as usize)
    }

    /// Coverage per offset, offset 0 first.
    pub fn coverages(&self) -> Vec<u8> {
        self.weeks.iter().map(|logs| coverage(logs)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[ActivityLog]> {
        self.weeks.iter().map(Vec::as_slice)
    }
}

/// One point of the coverage trend.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WeekCoverage {
    pub week_start: WeekKey,
    pub offset: usize,
    pub coverage: u8,
    pub entry_count: usize,
}

/// Coverage for every week in the window, most recent first.
pub fn coverage_trend(history: &WeeklyHistory) -> Vec<WeekCoverage> {
    history
        .iter()
        .enumerate()
        .map(|(offset, logs)| WeekCoverage {
            week_start: history.week_key(offset),
            offset,
            coverage: coverage(logs),
            entry_count: logs.len(),
        })
        .collect()
}
