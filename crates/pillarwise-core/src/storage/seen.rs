//! SQLite-backed seen-store, keyed per user.

use chrono::{SecondsFormat, Utc};
use rusqlite::params;
use std::collections::HashSet;

use crate::error::StoreError;
use crate::seen_store::SeenStore;

use super::Database;

/// Seen milestones for one user, stored in `milestones_seen`.
///
/// Each insert is its own autocommit statement, so the id is on disk by
/// the time `insert` returns.
pub struct DbSeenStore<'a> {
    db: &'a Database,
    user_id: String,
}

impl<'a> DbSeenStore<'a> {
    pub fn new(db: &'a Database, user_id: impl Into<String>) -> Self {
        Self {
            db,
            user_id: user_id.into(),
        }
    }
}

impl SeenStore for DbSeenStore<'_> {
    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        let count: i64 = self.db.conn().query_row(
            "SELECT COUNT(*) FROM milestones_seen WHERE user_id = ?1 AND milestone_id = ?2",
            params![self.user_id, id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn insert(&mut self, id: &str) -> Result<(), StoreError> {
        self.db.conn().execute(
            "INSERT OR IGNORE INTO milestones_seen (user_id, milestone_id, seen_at)
             VALUES (?1, ?2, ?3)",
            params![
                self.user_id,
                id,
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            ],
        )?;
        Ok(())
    }

    fn all(&self) -> Result<HashSet<String>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare("SELECT milestone_id FROM milestones_seen WHERE user_id = ?1")?;
        let ids = stmt
            .query_map(params![self.user_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<HashSet<_>>>()?;
        Ok(ids)
    }
}
