//! Mapper implementations for converting between DTOs and contract models
//!
//! Also hosts the JSON rendering of the canonical snapshot, which has no
//! static DTO because its key set is open-ended.

use super::dto::{MobileSettingsDto, MobileUpdateRequest, UpdateSettingsRequest};
use crate::contract::{
    MobilePatch, MobileSettings, SettingValue, SettingsChange, SettingsError, Snapshot,
};
use serde_json::{Map, Number, Value};

// ===== Snapshot rendering =====

/// Render a snapshot as a flat JSON object, the web/admin wire shape
pub fn snapshot_to_json(snapshot: &Snapshot) -> Value {
    let mut object = Map::new();
    for (key, value) in snapshot.iter() {
        object.insert(key.clone(), value_to_json(value));
    }
    Value::Object(object)
}

fn value_to_json(value: &SettingValue) -> Value {
    match value {
        SettingValue::Bool(flag) => Value::Bool(*flag),
        SettingValue::Number(number) => {
            if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                Value::Number(Number::from(*number as i64))
            } else {
                Number::from_f64(*number)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        SettingValue::Text(text) => Value::String(text.clone()),
    }
}

// ===== Admin update request =====

/// Parse an admin update payload, accepting scalar values only
pub fn settings_change_from_request(
    request: UpdateSettingsRequest,
) -> Result<SettingsChange, SettingsError> {
    let mut change = SettingsChange::new();

    for (key, value) in request.0 {
        let value = match value {
            Value::Bool(flag) => SettingValue::Bool(flag),
            Value::Number(number) => match number.as_f64() {
                Some(number) => SettingValue::Number(number),
                None => return Err(invalid_value(&key)),
            },
            Value::String(text) => SettingValue::Text(text),
            Value::Null | Value::Array(_) | Value::Object(_) => {
                return Err(invalid_value(&key));
            }
        };
        change.set(key, value);
    }

    Ok(change)
}

fn invalid_value(key: &str) -> SettingsError {
    SettingsError::Validation {
        message: format!("setting '{}' must be a boolean, number or string", key),
    }
}

// ===== Mobile conversions =====

impl From<MobileSettings> for MobileSettingsDto {
    fn from(settings: MobileSettings) -> Self {
        Self {
            minimum_passing_score: settings.minimum_passing_score,
            hard_mode_threshold: settings.hard_mode_threshold,

            minigame1_enabled: settings.minigame1_enabled,
            mg1_speed_normal: settings.mg1_speed_normal,
            mg1_speed_hard: settings.mg1_speed_hard,

            minigame2_enabled: settings.minigame2_enabled,
            mg2_rounds: settings.mg2_rounds,
            mg2_speed_normal: settings.mg2_speed_normal,
            mg2_speed_hard: settings.mg2_speed_hard,

            minigame3_enabled: settings.minigame3_enabled,
            mg3_rounds: settings.mg3_rounds,
            mg3_time_normal: settings.mg3_time_normal,
            mg3_time_hard: settings.mg3_time_hard,

            minigame4_enabled: settings.minigame4_enabled,
            mg4_time_normal: settings.mg4_time_normal,
            mg4_time_hard: settings.mg4_time_hard,

            minigame5_enabled: settings.minigame5_enabled,
            mg5_time_normal: settings.mg5_time_normal,
            mg5_time_hard: settings.mg5_time_hard,

            mg1_score_hit: settings.mg1_score_hit,
            mg2_score_max: settings.mg2_score_max,
            mg3_score_round: settings.mg3_score_round,
            mg4_score_max: settings.mg4_score_max,
            mg5_score_hit: settings.mg5_score_hit,
        }
    }
}

impl From<MobileUpdateRequest> for MobilePatch {
    fn from(request: MobileUpdateRequest) -> Self {
        Self {
            minimum_passing_score: request.minimum_passing_score,
            hard_mode_threshold: request.hard_mode_threshold,

            minigame1_enabled: request.minigame1_enabled,
            mg1_enabled: request.mg1_enabled,
            mg1_speed_normal: request.mg1_speed_normal,
            mg1_speed_hard: request.mg1_speed_hard,

            minigame2_enabled: request.minigame2_enabled,
            mg2_enabled: request.mg2_enabled,
            mg2_rounds: request.mg2_rounds,
            mg2_speed_normal: request.mg2_speed_normal,
            mg2_speed_hard: request.mg2_speed_hard,

            minigame3_enabled: request.minigame3_enabled,
            mg3_enabled: request.mg3_enabled,
            mg3_rounds: request.mg3_rounds,
            mg3_time_normal: request.mg3_time_normal,
            mg3_time_hard: request.mg3_time_hard,

            minigame4_enabled: request.minigame4_enabled,
            mg4_enabled: request.mg4_enabled,
            mg4_time_normal: request.mg4_time_normal,
            mg4_time_hard: request.mg4_time_hard,

            minigame5_enabled: request.minigame5_enabled,
            mg5_enabled: request.mg5_enabled,
            mg5_time_normal: request.mg5_time_normal,
            mg5_time_hard: request.mg5_time_hard,

            mg1_score_hit: request.mg1_score_hit,
            mg2_score_max: request.mg2_score_max,
            mg3_score_round: request.mg3_score_round,
            mg4_score_max: request.mg4_score_max,
            mg5_score_hit: request.mg5_score_hit,
        }
    }
}

/// Mobile wire payload for stream broadcasts
pub fn mobile_to_json(mobile: &MobileSettings) -> Value {
    serde_json::to_value(MobileSettingsDto::from(mobile.clone())).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_decimal_point() {
        let json = snapshot_to_json(&Snapshot::defaults());

        assert_eq!(json["mg1_speed_normal"], serde_json::json!(2500));
        assert_eq!(json["minigame_enabled"], serde_json::json!(true));
    }

    #[test]
    fn scalar_values_become_typed_changes() {
        let request: UpdateSettingsRequest = serde_json::from_value(serde_json::json!({
            "mg1_enabled": false,
            "minimum_passing_score": 75,
            "greeting": "hello"
        }))
        .expect("deserialize failed");

        let change = settings_change_from_request(request).expect("conversion failed");

        assert_eq!(change.len(), 3);
        assert!(change
            .iter()
            .any(|(key, value)| key == "mg1_enabled" && *value == SettingValue::Bool(false)));
        assert!(change.iter().any(|(key, value)| {
            key == "minimum_passing_score" && *value == SettingValue::Number(75.0)
        }));
    }

    #[test]
    fn non_scalar_values_are_rejected() {
        for payload in [
            serde_json::json!({ "mg1_enabled": null }),
            serde_json::json!({ "mg1_enabled": [1, 2] }),
            serde_json::json!({ "mg1_enabled": { "nested": true } }),
        ] {
            let request: UpdateSettingsRequest =
                serde_json::from_value(payload).expect("deserialize failed");
            let error = settings_change_from_request(request).expect_err("should reject");
            assert!(matches!(error, SettingsError::Validation { .. }));
        }
    }

    #[test]
    fn unknown_mobile_payload_keys_are_dropped() {
        let request: MobileUpdateRequest = serde_json::from_value(serde_json::json!({
            "minigame1_enabled": false,
            "not_a_setting": 42
        }))
        .expect("deserialize failed");

        let patch = MobilePatch::from(request);

        assert_eq!(patch.minigame1_enabled, Some(false));
        assert_eq!(patch, MobilePatch {
            minigame1_enabled: Some(false),
            ..MobilePatch::default()
        });
    }
}
