//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Admin-side settings update request: a partial canonical object
///
/// Every present field is a requested change; values must be booleans,
/// numbers or strings.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest(
    #[schema(value_type = Object)] pub serde_json::Map<String, serde_json::Value>,
);

/// Mobile-shaped settings response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MobileSettingsDto {
    pub minimum_passing_score: f64,
    pub hard_mode_threshold: f64,

    pub minigame1_enabled: bool,
    pub mg1_speed_normal: f64,
    pub mg1_speed_hard: f64,

    pub minigame2_enabled: bool,
    pub mg2_rounds: f64,
    pub mg2_speed_normal: f64,
    pub mg2_speed_hard: f64,

    pub minigame3_enabled: bool,
    pub mg3_rounds: f64,
    pub mg3_time_normal: f64,
    pub mg3_time_hard: f64,

    pub minigame4_enabled: bool,
    pub mg4_time_normal: f64,
    pub mg4_time_hard: f64,

    pub minigame5_enabled: bool,
    pub mg5_time_normal: f64,
    pub mg5_time_hard: f64,

    pub mg1_score_hit: i64,
    pub mg2_score_max: i64,
    pub mg3_score_round: i64,
    pub mg4_score_max: i64,
    pub mg5_score_hit: i64,
}

/// Mobile-side settings update request
///
/// Enabled flags accept both the mobile and the canonical field name; any
/// unrecognized key in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct MobileUpdateRequest {
    pub minimum_passing_score: Option<f64>,
    pub hard_mode_threshold: Option<f64>,

    pub minigame1_enabled: Option<bool>,
    pub mg1_enabled: Option<bool>,
    pub mg1_speed_normal: Option<f64>,
    pub mg1_speed_hard: Option<f64>,

    pub minigame2_enabled: Option<bool>,
    pub mg2_enabled: Option<bool>,
    pub mg2_rounds: Option<f64>,
    pub mg2_speed_normal: Option<f64>,
    pub mg2_speed_hard: Option<f64>,

    pub minigame3_enabled: Option<bool>,
    pub mg3_enabled: Option<bool>,
    pub mg3_rounds: Option<f64>,
    pub mg3_time_normal: Option<f64>,
    pub mg3_time_hard: Option<f64>,

    pub minigame4_enabled: Option<bool>,
    pub mg4_enabled: Option<bool>,
    pub mg4_time_normal: Option<f64>,
    pub mg4_time_hard: Option<f64>,

    pub minigame5_enabled: Option<bool>,
    pub mg5_enabled: Option<bool>,
    pub mg5_time_normal: Option<f64>,
    pub mg5_time_hard: Option<f64>,

    pub mg1_score_hit: Option<f64>,
    pub mg2_score_max: Option<f64>,
    pub mg3_score_round: Option<f64>,
    pub mg4_score_max: Option<f64>,
    pub mg5_score_hit: Option<f64>,
}

// Note: conversion implementations live in mapper.rs
