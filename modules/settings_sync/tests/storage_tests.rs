//! SQLite-backed tests for the SeaORM repositories and migrations

use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait};
use sea_orm_migration::MigratorTrait;
use settings_sync::contract::{Activity, SettingRecord};
use settings_sync::domain::repository::{ActivityRepository, SettingsRepository};
use settings_sync::infra::storage::{
    entity, Migrator, SeaOrmActivityRepository, SeaOrmSettingsRepository,
};
use std::sync::Arc;

async fn connect() -> Arc<DatabaseConnection> {
    // a single connection keeps the in-memory database alive for the test
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None).await.expect("migrations failed");

    Arc::new(db)
}

#[tokio::test]
async fn upsert_inserts_then_overwrites() {
    let db = connect().await;
    let repo = SeaOrmSettingsRepository::new(db);

    repo.upsert("mg1_enabled", "true").await.expect("insert failed");
    repo.upsert("mg1_enabled", "false")
        .await
        .expect("update failed");

    let row = repo.find("mg1_enabled").await.expect("find failed");
    assert_eq!(
        row,
        Some(SettingRecord {
            key: "mg1_enabled".to_string(),
            value: "false".to_string(),
        })
    );

    let rows = repo.load().await.expect("load failed");
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn load_returns_rows_in_key_order() {
    let db = connect().await;
    let repo = SeaOrmSettingsRepository::new(db);

    repo.upsert("minimum_passing_score", "70")
        .await
        .expect("upsert failed");
    repo.upsert("hard_mode_threshold", "85")
        .await
        .expect("upsert failed");
    repo.upsert("mg1_speed_normal", "2500")
        .await
        .expect("upsert failed");

    let keys: Vec<String> = repo
        .load()
        .await
        .expect("load failed")
        .into_iter()
        .map(|record| record.key)
        .collect();

    assert_eq!(
        keys,
        vec![
            "hard_mode_threshold".to_string(),
            "mg1_speed_normal".to_string(),
            "minimum_passing_score".to_string(),
        ]
    );
}

#[tokio::test]
async fn find_missing_key_returns_none() {
    let db = connect().await;
    let repo = SeaOrmSettingsRepository::new(db);

    let row = repo.find("mg9_enabled").await.expect("find failed");
    assert_eq!(row, None);
}

#[tokio::test]
async fn activity_entries_are_appended() {
    let db = connect().await;
    let repo = SeaOrmActivityRepository::new(db.clone());

    repo.record(&Activity::setting_updated("mg1_enabled", None, "true"))
        .await
        .expect("record failed");
    repo.record(&Activity::setting_updated("mg1_enabled", Some("true"), "false"))
        .await
        .expect("record failed");

    let rows = entity::activity::Entity::find()
        .all(&*db)
        .await
        .expect("query failed");

    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row.action == "setting_updated" && row.description.contains("mg1_enabled")));
}
