pub mod config;
pub mod history;
pub mod log;
pub mod milestones;
pub mod nudge;
pub mod progress;
pub mod streak;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use pillarwise_core::ValidationError;
use serde::Serialize;

/// Parse an `--at` timestamp, defaulting to the local clock.
pub fn parse_at(at: Option<&str>) -> Result<DateTime<FixedOffset>, Box<dyn std::error::Error>> {
    match at {
        Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))?),
        None => Ok(Local::now().fixed_offset()),
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::MalformedDate(raw.to_string()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
