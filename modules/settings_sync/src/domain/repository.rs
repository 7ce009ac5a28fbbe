//! Repository traits for data access
//!
//! These traits define the interface for data access operations.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{Activity, SettingRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Repository for the persisted settings key/value table
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load every stored row
    async fn load(&self) -> Result<Vec<SettingRecord>>;

    /// Point-read a single row
    async fn find(&self, key: &str) -> Result<Option<SettingRecord>>;

    /// Insert the key or overwrite its value
    async fn upsert(&self, key: &str, value: &str) -> Result<()>;
}

/// Repository for the activity audit trail
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append one audit entry
    async fn record(&self, activity: &Activity) -> Result<()>;
}
