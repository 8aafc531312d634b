//! SQLite-backed activity log store.
//!
//! Provides persistent storage for:
//! - Activity log entries, queried by week
//! - Seen milestones (see [`super::DbSeenStore`])
//! - Key-value store for small pieces of application state

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use uuid::Uuid;

use crate::activity::ActivityLog;
use crate::adherence::WeeklyHistory;
use crate::error::{Result, StoreError};
use crate::pillar::Pillar;
use crate::week::{week_start, weeks_before, WeekKey};

use super::data_dir;
use super::migrations;

/// Persistence and retrieval of activity logs.
///
/// Week queries must return the complete, deduplicated set of entries for
/// each week, ordered by `logged_at`.
pub trait LogStore {
    fn insert(&self, log: &ActivityLog) -> Result<()>;

    fn get(&self, id: &Uuid) -> Result<Option<ActivityLog>>;

    /// Owner edit of an entry's value. Fails with `NotFound` for entries
    /// owned by someone else.
    fn update_value(&self, user_id: &str, id: &Uuid, value: f64) -> Result<ActivityLog>;

    /// Remove an entry. Returns false when nothing matched.
    fn delete(&self, user_id: &str, id: &Uuid) -> Result<bool>;

    fn entries_for_week(&self, user_id: &str, week: WeekKey) -> Result<Vec<ActivityLog>>;

    /// Entries for `weeks` weeks ending at (and including) `current_week`.
    fn entries_for_last_weeks(
        &self,
        user_id: &str,
        current_week: WeekKey,
        weeks: usize,
    ) -> Result<Vec<ActivityLog>>;

    /// Entries for the last `weeks` weeks bucketed by offset.
    fn history(&self, user_id: &str, current_week: WeekKey, weeks: usize) -> Result<WeeklyHistory> {
        let entries = self.entries_for_last_weeks(user_id, current_week, weeks)?;
        Ok(WeeklyHistory::from_entries(current_week, weeks, entries))
    }
}

/// SQLite database for activity logs and tracker state.
pub struct Database {
    conn: Connection,
}

type RawRow = (String, String, String, f64, String, String, Option<String>);

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, pillar, value, logged_at, week_start, note FROM activity_logs";

fn corrupt(message: impl Into<String>) -> StoreError {
    StoreError::CorruptRow {
        table: "activity_logs".to_string(),
        message: message.into(),
    }
}

fn read_raw(row: &rusqlite::Row) -> rusqlite::Result<RawRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ))
}

fn decode(raw: RawRow) -> Result<ActivityLog, StoreError> {
    let (id, user_id, pillar, value, logged_at, week, note) = raw;
    let id = Uuid::parse_str(&id).map_err(|e| corrupt(format!("id '{id}': {e}")))?;
    let pillar: Pillar = pillar
        .parse()
        .map_err(|_| corrupt(format!("pillar '{pillar}'")))?;
    let logged_at = DateTime::parse_from_rfc3339(&logged_at)
        .map_err(|e| corrupt(format!("logged_at '{logged_at}': {e}")))?
        .with_timezone(&Utc);
    let week_start = NaiveDate::parse_from_str(&week, "%Y-%m-%d")
        .map_err(|e| corrupt(format!("week_start '{week}': {e}")))?;

    Ok(ActivityLog {
        id,
        user_id,
        pillar,
        value,
        logged_at,
        week_start,
        note,
    })
}

fn format_week(week: WeekKey) -> String {
    week.format("%Y-%m-%d").to_string()
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data_dir>/pillarwise.db`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("pillarwise.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(conn)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StoreError::from)?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn)
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_logs(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<ActivityLog>> {
        let mut stmt = self.conn.prepare(sql).map_err(StoreError::from)?;
        let rows = stmt
            .query_map(params, read_raw)
            .map_err(StoreError::from)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(StoreError::from)?;
        let logs = rows
            .into_iter()
            .map(decode)
            .collect::<Result<Vec<_>, StoreError>>()?;
        Ok(logs)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

impl LogStore for Database {
    fn insert(&self, log: &ActivityLog) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO activity_logs (id, user_id, pillar, value, logged_at, week_start, note)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    log.id.to_string(),
                    log.user_id,
                    log.pillar.as_str(),
                    log.value,
                    log.logged_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                    format_week(log.week_start),
                    log.note,
                ],
            )
            .map_err(StoreError::from)?;
        tracing::debug!(id = %log.id, pillar = %log.pillar, value = log.value, week = %log.week_start, "activity logged");
        Ok(())
    }

    fn get(&self, id: &Uuid) -> Result<Option<ActivityLog>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        Ok(self.query_logs(&sql, params![id.to_string()])?.into_iter().next())
    }

    fn update_value(&self, user_id: &str, id: &Uuid, value: f64) -> Result<ActivityLog> {
        let existing = self
            .get(id)?
            .filter(|log| log.user_id == user_id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let updated = existing.with_value(value)?;
        self.conn
            .execute(
                "UPDATE activity_logs SET value = ?1 WHERE id = ?2 AND user_id = ?3",
                params![updated.value, id.to_string(), user_id],
            )
            .map_err(StoreError::from)?;
        Ok(updated)
    }

    fn delete(&self, user_id: &str, id: &Uuid) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM activity_logs WHERE id = ?1 AND user_id = ?2",
                params![id.to_string(), user_id],
            )
            .map_err(StoreError::from)?;
        Ok(changed > 0)
    }

    fn entries_for_week(&self, user_id: &str, week: WeekKey) -> Result<Vec<ActivityLog>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE user_id = ?1 AND week_start = ?2 ORDER BY logged_at, id"
        );
        self.query_logs(&sql, params![user_id, format_week(week_start(week))])
    }

    fn entries_for_last_weeks(
        &self,
        user_id: &str,
        current_week: WeekKey,
        weeks: usize,
    ) -> Result<Vec<ActivityLog>> {
        if weeks == 0 {
            return Ok(Vec::new());
        }
        let newest = week_start(current_week);
        let oldest = weeks_before(newest, (weeks - 1) as u32);
        let sql = format!(
            "{SELECT_COLUMNS} WHERE user_id = ?1 AND week_start >= ?2 AND week_start <= ?3
             ORDER BY logged_at, id"
        );
        self.query_logs(
            &sql,
            params![user_id, format_week(oldest), format_week(newest)],
        )
    }
}
