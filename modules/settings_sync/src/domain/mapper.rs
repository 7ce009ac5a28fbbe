//! Format adapters between the canonical snapshot and the mobile shape
//!
//! Both directions are pure and total. Every field is named explicitly so
//! that adding a setting requires a conscious edit to both functions;
//! nothing is passed through by pattern.

use crate::contract::{
    defaults, MobilePatch, MobileSettings, SettingValue, SettingsChange, Snapshot,
};

/// Render a canonical snapshot in the mobile naming convention
///
/// `mgN_enabled` flags are renamed to `minigameN_enabled`; numeric fields
/// pass through; score fields fall back to their documented literals when
/// the snapshot lacks them. The global `minigame_enabled` flag has no
/// mobile counterpart and is dropped.
pub fn to_mobile(snapshot: &Snapshot) -> MobileSettings {
    MobileSettings {
        minimum_passing_score: snapshot
            .number("minimum_passing_score")
            .unwrap_or(defaults::MINIMUM_PASSING_SCORE),
        hard_mode_threshold: snapshot
            .number("hard_mode_threshold")
            .unwrap_or(defaults::HARD_MODE_THRESHOLD),

        minigame1_enabled: snapshot.flag("mg1_enabled").unwrap_or(defaults::MG1_ENABLED),
        mg1_speed_normal: snapshot
            .number("mg1_speed_normal")
            .unwrap_or(defaults::MG1_SPEED_NORMAL),
        mg1_speed_hard: snapshot
            .number("mg1_speed_hard")
            .unwrap_or(defaults::MG1_SPEED_HARD),

        minigame2_enabled: snapshot.flag("mg2_enabled").unwrap_or(defaults::MG2_ENABLED),
        mg2_rounds: snapshot.number("mg2_rounds").unwrap_or(defaults::MG2_ROUNDS),
        mg2_speed_normal: snapshot
            .number("mg2_speed_normal")
            .unwrap_or(defaults::MG2_SPEED_NORMAL),
        mg2_speed_hard: snapshot
            .number("mg2_speed_hard")
            .unwrap_or(defaults::MG2_SPEED_HARD),

        minigame3_enabled: snapshot.flag("mg3_enabled").unwrap_or(defaults::MG3_ENABLED),
        mg3_rounds: snapshot.number("mg3_rounds").unwrap_or(defaults::MG3_ROUNDS),
        mg3_time_normal: snapshot
            .number("mg3_time_normal")
            .unwrap_or(defaults::MG3_TIME_NORMAL),
        mg3_time_hard: snapshot
            .number("mg3_time_hard")
            .unwrap_or(defaults::MG3_TIME_HARD),

        minigame4_enabled: snapshot.flag("mg4_enabled").unwrap_or(defaults::MG4_ENABLED),
        mg4_time_normal: snapshot
            .number("mg4_time_normal")
            .unwrap_or(defaults::MG4_TIME_NORMAL),
        mg4_time_hard: snapshot
            .number("mg4_time_hard")
            .unwrap_or(defaults::MG4_TIME_HARD),

        minigame5_enabled: snapshot.flag("mg5_enabled").unwrap_or(defaults::MG5_ENABLED),
        mg5_time_normal: snapshot
            .number("mg5_time_normal")
            .unwrap_or(defaults::MG5_TIME_NORMAL),
        mg5_time_hard: snapshot
            .number("mg5_time_hard")
            .unwrap_or(defaults::MG5_TIME_HARD),

        mg1_score_hit: score(snapshot, "mg1_score_hit", defaults::MG1_SCORE_HIT),
        mg2_score_max: score(snapshot, "mg2_score_max", defaults::MG2_SCORE_MAX),
        mg3_score_round: score(snapshot, "mg3_score_round", defaults::MG3_SCORE_ROUND),
        mg4_score_max: score(snapshot, "mg4_score_max", defaults::MG4_SCORE_MAX),
        mg5_score_hit: score(snapshot, "mg5_score_hit", defaults::MG5_SCORE_HIT),
    }
}

fn score(snapshot: &Snapshot, key: &str, fallback: i64) -> i64 {
    snapshot
        .number(key)
        .map(|number| number as i64)
        .unwrap_or(fallback)
}

/// Normalize a mobile-side patch into canonical changes
///
/// Either naming convention is accepted for the enabled flags, the mobile
/// name winning when both are present. Absent fields stay absent.
pub fn from_mobile(patch: &MobilePatch) -> SettingsChange {
    let mut change = SettingsChange::new();

    set_number(
        &mut change,
        "minimum_passing_score",
        patch.minimum_passing_score,
    );
    set_number(&mut change, "hard_mode_threshold", patch.hard_mode_threshold);

    set_flag(
        &mut change,
        "mg1_enabled",
        patch.minigame1_enabled.or(patch.mg1_enabled),
    );
    set_number(&mut change, "mg1_speed_normal", patch.mg1_speed_normal);
    set_number(&mut change, "mg1_speed_hard", patch.mg1_speed_hard);

    set_flag(
        &mut change,
        "mg2_enabled",
        patch.minigame2_enabled.or(patch.mg2_enabled),
    );
    set_number(&mut change, "mg2_rounds", patch.mg2_rounds);
    set_number(&mut change, "mg2_speed_normal", patch.mg2_speed_normal);
    set_number(&mut change, "mg2_speed_hard", patch.mg2_speed_hard);

    set_flag(
        &mut change,
        "mg3_enabled",
        patch.minigame3_enabled.or(patch.mg3_enabled),
    );
    set_number(&mut change, "mg3_rounds", patch.mg3_rounds);
    set_number(&mut change, "mg3_time_normal", patch.mg3_time_normal);
    set_number(&mut change, "mg3_time_hard", patch.mg3_time_hard);

    set_flag(
        &mut change,
        "mg4_enabled",
        patch.minigame4_enabled.or(patch.mg4_enabled),
    );
    set_number(&mut change, "mg4_time_normal", patch.mg4_time_normal);
    set_number(&mut change, "mg4_time_hard", patch.mg4_time_hard);

    set_flag(
        &mut change,
        "mg5_enabled",
        patch.minigame5_enabled.or(patch.mg5_enabled),
    );
    set_number(&mut change, "mg5_time_normal", patch.mg5_time_normal);
    set_number(&mut change, "mg5_time_hard", patch.mg5_time_hard);

    set_number(&mut change, "mg1_score_hit", patch.mg1_score_hit);
    set_number(&mut change, "mg2_score_max", patch.mg2_score_max);
    set_number(&mut change, "mg3_score_round", patch.mg3_score_round);
    set_number(&mut change, "mg4_score_max", patch.mg4_score_max);
    set_number(&mut change, "mg5_score_hit", patch.mg5_score_hit);

    change
}

fn set_flag(change: &mut SettingsChange, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        change.set(key, SettingValue::Bool(value));
    }
}

fn set_number(change: &mut SettingsChange, key: &str, value: Option<f64>) {
    if let Some(value) = value {
        change.set(key, SettingValue::Number(value));
    }
}
