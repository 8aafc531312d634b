//! Activity log entries and the write-boundary validation.
//!
//! Everything downstream of [`ActivityLog::record`] assumes clean input:
//! non-negative finite values, a known pillar and a Monday-aligned week key.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::pillar::Pillar;
use crate::week::{is_week_start, week_start, WeekKey};

/// A single logged amount of activity toward one pillar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub user_id: String,
    pub pillar: Pillar,
    /// Amount in the pillar's unit
    pub value: f64,
    pub logged_at: DateTime<Utc>,
    /// Week the entry counts toward. Fixed at write time.
    pub week_start: WeekKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Input for recording a new entry.
#[derive(Debug, Clone)]
pub struct NewActivityLog {
    pub user_id: String,
    pub pillar: Pillar,
    pub value: f64,
    /// Local wall-clock time of the activity. The local date decides the week.
    pub logged_at: DateTime<FixedOffset>,
    /// Explicit week the entry should count toward (backfill)
    pub week_override: Option<NaiveDate>,
    pub note: Option<String>,
}

impl NewActivityLog {
    pub fn new(
        user_id: impl Into<String>,
        pillar: Pillar,
        value: f64,
        logged_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            pillar,
            value,
            logged_at,
            week_override: None,
            note: None,
        }
    }

    pub fn for_week(mut self, week: NaiveDate) -> Self {
        self.week_override = Some(week);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

fn validate_value(pillar: Pillar, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            pillar: pillar.to_string(),
            value,
        });
    }
    Ok(())
}

impl ActivityLog {
    /// Validate and stamp a new entry.
    ///
    /// # Errors
    /// Rejects negative or non-finite values, an empty owner and a week
    /// override that is not a Monday.
    pub fn record(input: NewActivityLog) -> Result<Self, ValidationError> {
        if input.user_id.trim().is_empty() {
            return Err(ValidationError::EmptyUserId);
        }
        validate_value(input.pillar, input.value)?;

        let week = match input.week_override {
            Some(week) if !is_week_start(week) => {
                return Err(ValidationError::MisalignedWeek(week));
            }
            Some(week) => week,
            None => week_start(input.logged_at.date_naive()),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            pillar: input.pillar,
            value: input.value,
            logged_at: input.logged_at.with_timezone(&Utc),
            week_start: week,
            note: input.note.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Owner edit of the logged amount. The week key never changes.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidValue`] for negative or non-finite values.
    pub fn with_value(&self, value: f64) -> Result<Self, ValidationError> {
        validate_value(self.pillar, value)?;
        Ok(Self {
            value,
            ..self.clone()
        })
    }

    /// Whether the entry was logged on `date` as seen from `offset`.
    pub fn logged_on(&self, date: NaiveDate, offset: &FixedOffset) -> bool {
        self.logged_at.with_timezone(offset).date_naive() == date
    }
}
