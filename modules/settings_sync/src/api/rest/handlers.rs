//! HTTP request handlers - thin layer that delegates to the domain service

use super::{
    dto::{MobileSettingsDto, MobileUpdateRequest, UpdateSettingsRequest},
    error::{map_domain_error, Problem},
    mapper,
};
use crate::domain::Service;
use axum::{Extension, Json};
use std::sync::Arc;

/// Canonical settings snapshot for the admin UI
pub async fn get_settings(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<serde_json::Value>, Problem> {
    let snapshot = service.settings().await.map_err(map_domain_error)?;

    Ok(Json(mapper::snapshot_to_json(&snapshot)))
}

/// Apply a partial canonical update and answer with the fresh snapshot
pub async fn update_settings(
    Extension(service): Extension<Arc<Service>>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<serde_json::Value>, Problem> {
    let change = mapper::settings_change_from_request(request).map_err(map_domain_error)?;
    let snapshot = service
        .update_settings(change)
        .await
        .map_err(map_domain_error)?;

    Ok(Json(mapper::snapshot_to_json(&snapshot)))
}

/// Settings in the mobile shape
pub async fn get_mobile_settings(
    Extension(service): Extension<Arc<Service>>,
) -> Result<Json<MobileSettingsDto>, Problem> {
    let mobile = service.mobile_settings().await.map_err(map_domain_error)?;

    Ok(Json(mobile.into()))
}

/// Apply a mobile-side update and answer in the mobile shape
pub async fn update_mobile_settings(
    Extension(service): Extension<Arc<Service>>,
    Json(request): Json<MobileUpdateRequest>,
) -> Result<Json<MobileSettingsDto>, Problem> {
    let mobile = service
        .update_mobile_settings(request.into())
        .await
        .map_err(map_domain_error)?;

    Ok(Json(mobile.into()))
}
