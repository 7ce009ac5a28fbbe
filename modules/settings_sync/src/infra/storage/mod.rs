//! Storage infrastructure - SeaORM entities, repositories and migrations

pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod repositories;

pub use migrations::Migrator;
pub use repositories::{SeaOrmActivityRepository, SeaOrmSettingsRepository};
