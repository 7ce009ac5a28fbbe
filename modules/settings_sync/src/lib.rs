//! Settings Synchronization Module
//!
//! Cache-and-broadcast synchronization for the fatigue assessment platform:
//! a TTL cache fronting the settings store, format adapters between the
//! canonical and mobile naming conventions, and an SSE broadcast registry
//! keeping the admin UI and the mobile app in step.

// Public exports
pub mod contract;
pub use contract::{
    Activity, MobilePatch, MobileSettings, SettingRecord, SettingValue, SettingsChange,
    SettingsError, Snapshot,
};

pub mod config;

pub mod domain;
pub use domain::{Audience, BroadcastRegistry, Service, SettingsCache};

pub mod api;
pub mod infra;
