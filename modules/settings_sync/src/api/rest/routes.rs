//! Route registration for the settings API

use super::{handlers, stream};
use crate::domain::{BroadcastRegistry, Service};
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

/// Build the settings router with the service and registry attached as
/// extensions
pub fn router(service: Arc<Service>, registry: Arc<BroadcastRegistry>) -> Router {
    Router::new()
        // Admin endpoints (canonical shape)
        .route(
            "/api/admin/settings",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route(
            "/api/admin/settings/stream",
            get(stream::stream_web_settings),
        )
        // Mobile endpoints (mobile shape)
        .route(
            "/api/mobile/settings",
            get(handlers::get_mobile_settings).put(handlers::update_mobile_settings),
        )
        .route(
            "/api/mobile/settings/stream",
            get(stream::stream_mobile_settings),
        )
        .layer(Extension(service))
        .layer(Extension(registry))
}
