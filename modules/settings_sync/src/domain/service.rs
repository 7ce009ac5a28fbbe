//! Domain service - update orchestration

use super::cache::SettingsCache;
use super::events::UpdatePublisher;
use super::mapper;
use super::repository::{ActivityRepository, SettingsRepository};
use crate::contract::{
    Activity, MobilePatch, MobileSettings, SettingsChange, SettingsError, Snapshot,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Orchestrates settings reads and writes
///
/// A write persists each key independently, invalidates the cache,
/// re-primes it from the store and fans the fresh payloads out to both
/// audiences through the injected publisher.
pub struct Service {
    repo: Arc<dyn SettingsRepository>,
    activity: Arc<dyn ActivityRepository>,
    cache: SettingsCache,
    publisher: Arc<dyn UpdatePublisher>,
}

impl Service {
    /// Create a new service instance
    pub fn new(
        repo: Arc<dyn SettingsRepository>,
        activity: Arc<dyn ActivityRepository>,
        cache: SettingsCache,
        publisher: Arc<dyn UpdatePublisher>,
    ) -> Self {
        Self {
            repo,
            activity,
            cache,
            publisher,
        }
    }

    /// Current canonical snapshot, served from the cache
    pub async fn settings(&self) -> Result<Snapshot, SettingsError> {
        self.cache.get().await
    }

    /// Current settings in the mobile shape
    pub async fn mobile_settings(&self) -> Result<MobileSettings, SettingsError> {
        Ok(mapper::to_mobile(&self.cache.get().await?))
    }

    /// Persist a set of canonical changes and push the result to every
    /// open stream
    ///
    /// Each key is an independent upsert. When one fails, the keys already
    /// written stay written, the error surfaces to the caller and the
    /// cache keeps serving the pre-update snapshot (it is only invalidated
    /// after every key persisted).
    pub async fn update_settings(
        &self,
        change: SettingsChange,
    ) -> Result<Snapshot, SettingsError> {
        let previous = self.previous_values().await;

        for (key, value) in change.iter() {
            let stored = value.storage_value();
            self.repo
                .upsert(key, &stored)
                .await
                .map_err(|source| SettingsError::Persistence {
                    key: key.clone(),
                    source,
                })?;
            self.record_change(&previous, key, &stored).await;
        }

        self.cache.invalidate();
        let snapshot = self.cache.get().await?;
        let mobile = mapper::to_mobile(&snapshot);

        if let Err(error) = self.publisher.publish(&snapshot, &mobile).await {
            tracing::warn!(%error, "settings broadcast failed");
        }

        Ok(snapshot)
    }

    /// Mobile-side write: normalize the patch into canonical changes, run
    /// the usual orchestration and answer in the mobile shape
    pub async fn update_mobile_settings(
        &self,
        patch: MobilePatch,
    ) -> Result<MobileSettings, SettingsError> {
        let snapshot = self.update_settings(mapper::from_mobile(&patch)).await?;
        Ok(mapper::to_mobile(&snapshot))
    }

    /// Raw stored values keyed by setting, for the audit diff. Best
    /// effort: a failed read only disables change logging for this call.
    async fn previous_values(&self) -> Option<BTreeMap<String, String>> {
        match self.repo.load().await {
            Ok(records) => Some(
                records
                    .into_iter()
                    .map(|record| (record.key, record.value))
                    .collect(),
            ),
            Err(error) => {
                tracing::warn!(%error, "skipping settings audit diff");
                None
            }
        }
    }

    async fn record_change(
        &self,
        previous: &Option<BTreeMap<String, String>>,
        key: &str,
        stored: &str,
    ) {
        let Some(previous) = previous else { return };
        let old = previous.get(key).map(String::as_str);
        if old == Some(stored) {
            return;
        }

        let activity = Activity::setting_updated(key, old, stored);
        if let Err(error) = self.activity.record(&activity).await {
            tracing::warn!(%error, key, "failed to record settings activity");
        }
    }
}
