//! Persisted set of milestone ids already shown to the user.
//!
//! Backends report errors through [`SeenStore`]; callers go through the
//! fail-open helpers [`is_seen`], [`all_seen`] and [`mark_seen`], which log
//! the failure and degrade to "nothing seen". A storage outage can cause a
//! milestone to be shown again but never blocks a query.

use std::collections::HashSet;

use crate::error::StoreError;

/// Storage backend for seen milestone ids.
pub trait SeenStore {
    fn contains(&self, id: &str) -> Result<bool, StoreError>;

    /// Record `id`. Inserting an id that is already present is a no-op.
    /// Must be durable once it returns `Ok`.
    fn insert(&mut self, id: &str) -> Result<(), StoreError>;

    fn all(&self) -> Result<HashSet<String>, StoreError>;
}

/// Whether `id` has been shown. Unreadable storage counts as unseen.
pub fn is_seen(store: &dyn SeenStore, id: &str) -> bool {
    match store.contains(id) {
        Ok(seen) => seen,
        Err(e) => {
            tracing::warn!(milestone = id, error = %e, "seen-store read failed; treating as unseen");
            false
        }
    }
}

/// Every seen id. Unreadable storage yields an empty set.
pub fn all_seen(store: &dyn SeenStore) -> HashSet<String> {
    store.all().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "seen-store read failed; treating all milestones as unseen");
        HashSet::new()
    })
}

/// Record `id` as seen. Returns whether the write was persisted.
pub fn mark_seen(store: &mut dyn SeenStore, id: &str) -> bool {
    match store.insert(id) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(milestone = id, error = %e, "seen-store write failed");
            false
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemorySeenStore {
    ids: HashSet<String>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seen<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

impl SeenStore for MemorySeenStore {
    fn contains(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.ids.contains(id))
    }

    fn insert(&mut self, id: &str) -> Result<(), StoreError> {
        self.ids.insert(id.to_string());
        Ok(())
    }

    fn all(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.ids.clone())
    }
}
