//! Composition root: wiring, router assembly and the serve loop

use crate::config::AppConfig;
use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use settings_sync::api::rest::{self, SseUpdatePublisher};
use settings_sync::domain::repository::{ActivityRepository, SettingsRepository};
use settings_sync::domain::{BroadcastRegistry, Service, SettingsCache};
use settings_sync::infra::storage::{Migrator, SeaOrmActivityRepository, SeaOrmSettingsRepository};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db = Database::connect(&config.database.url)
        .await
        .context("failed to connect to the database")?;
    Migrator::up(&db, None)
        .await
        .context("failed to run migrations")?;
    let db = Arc::new(db);

    let settings_repo: Arc<dyn SettingsRepository> =
        Arc::new(SeaOrmSettingsRepository::new(db.clone()));
    let activity_repo: Arc<dyn ActivityRepository> = Arc::new(SeaOrmActivityRepository::new(db));

    // The registry and publisher are owned here and handed down by
    // reference; no handler reaches them through global state.
    let registry = Arc::new(BroadcastRegistry::new());
    let publisher = Arc::new(SseUpdatePublisher::new(registry.clone()));
    let cache = SettingsCache::new(settings_repo.clone(), config.settings.cache_ttl);
    let service = Arc::new(Service::new(settings_repo, activity_repo, cache, publisher));

    let router = rest::router(service, registry)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .server
        .cors_allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid CORS origin '{origin}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(error) => {
                tracing::error!(%error, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
