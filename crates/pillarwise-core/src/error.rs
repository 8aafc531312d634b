//! Core error types for pillarwise-core.
//!
//! The adherence, streak and nudge calculations are pure and never fail.
//! Errors only arise at the edges: the write boundary for activity logs,
//! SQLite persistence and TOML configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pillarwise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the SQLite-backed log store and seen-store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Stored row could not be decoded
    #[error("Corrupt row in '{table}': {message}")]
    CorruptRow { table: String, message: String },

    /// Database is locked
    #[error("Database is locked")]
    Locked,

    /// Entry does not exist
    #[error("Activity log {0} not found")]
    NotFound(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised at the activity-log write boundary.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// Value is negative, NaN or infinite
    #[error("Invalid value for {pillar}: {value} (must be a finite number >= 0)")]
    InvalidValue { pillar: String, value: f64 },

    /// Pillar name is not one of the five pillars
    #[error("Unknown pillar '{0}' (expected one of: cardio, strength, sleep, clean_eating, mindfulness)")]
    UnknownPillar(String),

    /// Week override does not fall on a Monday
    #[error("Week start {0} is not a Monday")]
    MisalignedWeek(chrono::NaiveDate),

    /// Date or timestamp could not be parsed
    #[error("Malformed date '{0}'")]
    MalformedDate(String),

    /// Owner is missing
    #[error("user_id must not be empty")]
    EmptyUserId,

    /// History window is empty or too long
    #[error("History window of {weeks} weeks is out of range (1..={max})")]
    HistoryWindow { weeks: usize, max: usize },
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked
                    || inner.code == rusqlite::ErrorCode::DatabaseBusy
                {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Store(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
