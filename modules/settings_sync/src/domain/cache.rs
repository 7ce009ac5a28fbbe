//! Process-local TTL cache fronting the settings store

use super::repository::SettingsRepository;
use crate::contract::{SettingsError, Snapshot};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct CachedSnapshot {
    snapshot: Snapshot,
    fetched_at: Instant,
}

/// Time-bounded cache around the settings store
///
/// One slot, all-or-nothing invalidation. Concurrent misses may each read
/// the store; the last completed read wins the slot, which is safe because
/// both reads observe the same store state.
pub struct SettingsCache {
    repo: Arc<dyn SettingsRepository>,
    ttl: Duration,
    slot: RwLock<Option<CachedSnapshot>>,
}

impl SettingsCache {
    pub fn new(repo: Arc<dyn SettingsRepository>, ttl: Duration) -> Self {
        Self {
            repo,
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Current snapshot, fetched from the store and merged over defaults
    /// when the slot is empty or expired. A failed store read leaves the
    /// slot empty so the next call retries.
    pub async fn get(&self) -> Result<Snapshot, SettingsError> {
        if let Some(snapshot) = self.cached() {
            tracing::debug!("settings cache hit");
            return Ok(snapshot);
        }

        tracing::debug!("settings cache miss, loading from store");
        let records = self
            .repo
            .load()
            .await
            .map_err(|source| SettingsError::Load { source })?;
        let snapshot = Snapshot::from_records(records);

        // The lock is never held across an await; racing misses simply
        // overwrite each other with equivalent snapshots.
        *self.slot.write() = Some(CachedSnapshot {
            snapshot: snapshot.clone(),
            fetched_at: Instant::now(),
        });

        Ok(snapshot)
    }

    /// Discard the cached snapshot; the next `get` reads the store
    pub fn invalidate(&self) {
        *self.slot.write() = None;
        tracing::debug!("settings cache invalidated");
    }

    fn cached(&self) -> Option<Snapshot> {
        self.slot
            .read()
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| cached.snapshot.clone())
    }
}
