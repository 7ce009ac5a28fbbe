//! SeaORM repository implementations

use crate::contract::{Activity, SettingRecord};
use crate::domain::repository::{ActivityRepository, SettingsRepository};
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use std::sync::Arc;

use super::entity;

// ===== Settings Repository =====

pub struct SeaOrmSettingsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSettingsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SettingsRepository for SeaOrmSettingsRepository {
    async fn load(&self) -> Result<Vec<SettingRecord>> {
        let rows = entity::Entity::find()
            .order_by_asc(entity::Column::SettingKey)
            .all(&*self.db)
            .await?;

        Ok(rows.into_iter().map(|row| row.into()).collect())
    }

    async fn find(&self, key: &str) -> Result<Option<SettingRecord>> {
        let row = entity::Entity::find_by_id(key).one(&*self.db).await?;

        Ok(row.map(|row| row.into()))
    }

    async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now();

        let existing = entity::Entity::find_by_id(key).one(&*self.db).await?;

        match existing {
            Some(row) => {
                let mut active: entity::ActiveModel = row.into();
                active.setting_value = Set(value.to_string());
                active.updated_at = Set(now);
                entity::Entity::update(active).exec(&*self.db).await?;
            }
            None => {
                let active = entity::ActiveModel {
                    setting_key: Set(key.to_string()),
                    setting_value: Set(value.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                entity::Entity::insert(active).exec(&*self.db).await?;
            }
        }

        Ok(())
    }
}

// ===== Activity Repository =====

pub struct SeaOrmActivityRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmActivityRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepository for SeaOrmActivityRepository {
    async fn record(&self, activity: &Activity) -> Result<()> {
        let active: entity::activity::ActiveModel = activity.into();
        entity::activity::Entity::insert(active)
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}
