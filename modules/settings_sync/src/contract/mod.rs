//! Contract layer - public models and errors
//!
//! Transport-agnostic types shared by every layer.
//! NO serde derives on models - wire shapes live in the REST DTOs.

pub mod error;
pub mod model;

pub use error::SettingsError;
pub use model::{
    defaults, Activity, MobilePatch, MobileSettings, SettingRecord, SettingValue, SettingsChange,
    Snapshot,
};
