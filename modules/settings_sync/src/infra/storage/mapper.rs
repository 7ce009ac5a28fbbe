//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models

use super::entity;
use crate::contract::{Activity, SettingRecord};

impl From<entity::Model> for SettingRecord {
    fn from(entity: entity::Model) -> Self {
        Self {
            key: entity.setting_key,
            value: entity.setting_value,
        }
    }
}

impl From<&Activity> for entity::activity::ActiveModel {
    fn from(model: &Activity) -> Self {
        use sea_orm::ActiveValue::*;

        Self {
            id: NotSet,
            action: Set(model.action.clone()),
            description: Set(model.description.clone()),
            created_at: Set(chrono::Utc::now()),
        }
    }
}
