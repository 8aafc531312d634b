//! # Pillarwise Core Library
//!
//! This library provides the core logic for Pillarwise, a weekly adherence
//! tracker over five wellness pillars. It follows a CLI-first philosophy: every
//! operation is available through the standalone CLI binary, and any UI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Adherence**: Pure weekly progress, coverage, streak and milestone
//!   calculations over activity logs
//! - **Celebrations**: Write hook that emits all-five and milestone events
//!   exactly once
//! - **Nudges**: Priority-ordered contextual rule table evaluated against the
//!   current week and local time
//! - **Storage**: SQLite-based activity log storage and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: Query and write-hook facade used by the CLI
//! - [`CelebrationTrigger`]: All-five latch and milestone check
//! - [`NudgeEngine`]: Contextual nudge selection
//! - [`Database`]: Activity log persistence
//! - [`Config`]: Application configuration management

pub mod activity;
pub mod adherence;
pub mod celebration;
pub mod error;
pub mod nudge;
pub mod pillar;
pub mod seen_store;
pub mod storage;
pub mod tracker;
pub mod week;

#[cfg(test)]
mod testing;

pub use activity::{ActivityLog, NewActivityLog};
pub use adherence::{
    coverage, default_catalog, longest_streak, progress, streak, unseen_milestone, Milestone,
    WeekCoverage, WeeklyHistory, WeeklyPillarState, WeeklySummary, DEFAULT_STREAK_THRESHOLD,
    MAX_HISTORY_WEEKS,
};
pub use celebration::{AllFiveLatch, CelebrationEvent, CelebrationTrigger};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use nudge::{generate_nudge, Nudge, NudgeAction, NudgeEngine, NudgeSettings};
pub use pillar::Pillar;
pub use seen_store::{MemorySeenStore, SeenStore};
pub use storage::{Config, Database, DbSeenStore, LogStore, TrackingConfig};
pub use tracker::{MilestoneReport, MilestoneStatus, RecordOutcome, StreakReport, Tracker};
pub use week::{week_start, WeekKey};
