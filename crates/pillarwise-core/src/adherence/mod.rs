//! Weekly adherence tracking.
//!
//! Aggregates logged activity into per-pillar progress, counts coverage,
//! walks week history for streaks and resolves streak milestones. Every
//! function here is a pure computation over an in-memory snapshot.

mod coverage;
mod history;
mod milestone;
mod progress;
mod streak;

pub use coverage::{coverage, unmet_pillars};
pub use history::{
    check_window, coverage_trend, WeekCoverage, WeeklyHistory, MAX_HISTORY_WEEKS,
};
pub use milestone::{default_catalog, reached, unseen_milestone, Milestone};
pub use progress::{
    met, pillar_state, pillar_states, progress, PillarProgress, WeeklyPillarState, WeeklySummary,
};
pub use streak::{longest_streak, streak, streak_from_coverages, DEFAULT_STREAK_THRESHOLD};
