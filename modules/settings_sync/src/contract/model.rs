//! Contract models for settings synchronization
//!
//! These models are transport-agnostic and shared by every layer.
//! NO serde derives - wire shapes live in api/rest/dto.rs.

use std::collections::BTreeMap;

/// Hard-coded default mapping. Every snapshot handed to a caller contains
/// at least these keys, so a missing store row never surfaces downstream.
pub mod defaults {
    pub const MINIMUM_PASSING_SCORE: f64 = 70.0;
    pub const HARD_MODE_THRESHOLD: f64 = 85.0;
    pub const MINIGAME_ENABLED: bool = true;

    pub const MG1_ENABLED: bool = true;
    pub const MG1_SPEED_NORMAL: f64 = 2500.0;
    pub const MG1_SPEED_HARD: f64 = 1000.0;
    pub const MG1_SCORE_HIT: i64 = 50;

    pub const MG2_ENABLED: bool = true;
    pub const MG2_ROUNDS: f64 = 3.0;
    pub const MG2_SPEED_NORMAL: f64 = 2500.0;
    pub const MG2_SPEED_HARD: f64 = 1500.0;
    pub const MG2_SCORE_MAX: i64 = 1000;

    pub const MG3_ENABLED: bool = true;
    pub const MG3_ROUNDS: f64 = 5.0;
    pub const MG3_TIME_NORMAL: f64 = 3000.0;
    pub const MG3_TIME_HARD: f64 = 2000.0;
    pub const MG3_SCORE_ROUND: i64 = 200;

    pub const MG4_ENABLED: bool = true;
    pub const MG4_TIME_NORMAL: f64 = 3000.0;
    pub const MG4_TIME_HARD: f64 = 2000.0;
    pub const MG4_SCORE_MAX: i64 = 100;

    pub const MG5_ENABLED: bool = true;
    pub const MG5_TIME_NORMAL: f64 = 3000.0;
    pub const MG5_TIME_HARD: f64 = 2000.0;
    pub const MG5_SCORE_HIT: i64 = 50;
}

/// Typed value of a single setting
///
/// The store keeps values as text; this is the tagged representation
/// produced by parse-on-read at the store boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl SettingValue {
    /// Type a raw stored text value: `"true"`/`"false"` become booleans,
    /// text that parses as a finite number becomes a number, anything
    /// else stays text.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => SettingValue::Bool(true),
            "false" => SettingValue::Bool(false),
            _ => match raw.parse::<f64>() {
                Ok(number) if number.is_finite() => SettingValue::Number(number),
                _ => SettingValue::Text(raw.to_string()),
            },
        }
    }

    /// Encode for storage as text. Inverse of [`parse`](Self::parse);
    /// integral numbers are written without a decimal point.
    pub fn storage_value(&self) -> String {
        match self {
            SettingValue::Bool(flag) => flag.to_string(),
            SettingValue::Number(number)
                if number.fract() == 0.0 && number.abs() < i64::MAX as f64 =>
            {
                format!("{}", *number as i64)
            }
            SettingValue::Number(number) => number.to_string(),
            SettingValue::Text(text) => text.clone(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Number(number) => Some(*number),
            _ => None,
        }
    }
}

/// Raw store row: key and untyped text value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRecord {
    pub key: String,
    pub value: String,
}

/// Full, typed, default-completed view of all settings at a point in time
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(BTreeMap<String, SettingValue>);

impl Snapshot {
    /// The hard-coded default mapping
    pub fn defaults() -> Self {
        let mut snapshot = Snapshot(BTreeMap::new());

        snapshot.insert(
            "minimum_passing_score",
            SettingValue::Number(defaults::MINIMUM_PASSING_SCORE),
        );
        snapshot.insert(
            "hard_mode_threshold",
            SettingValue::Number(defaults::HARD_MODE_THRESHOLD),
        );
        snapshot.insert(
            "minigame_enabled",
            SettingValue::Bool(defaults::MINIGAME_ENABLED),
        );

        snapshot.insert("mg1_enabled", SettingValue::Bool(defaults::MG1_ENABLED));
        snapshot.insert(
            "mg1_speed_normal",
            SettingValue::Number(defaults::MG1_SPEED_NORMAL),
        );
        snapshot.insert(
            "mg1_speed_hard",
            SettingValue::Number(defaults::MG1_SPEED_HARD),
        );
        snapshot.insert(
            "mg1_score_hit",
            SettingValue::Number(defaults::MG1_SCORE_HIT as f64),
        );

        snapshot.insert("mg2_enabled", SettingValue::Bool(defaults::MG2_ENABLED));
        snapshot.insert("mg2_rounds", SettingValue::Number(defaults::MG2_ROUNDS));
        snapshot.insert(
            "mg2_speed_normal",
            SettingValue::Number(defaults::MG2_SPEED_NORMAL),
        );
        snapshot.insert(
            "mg2_speed_hard",
            SettingValue::Number(defaults::MG2_SPEED_HARD),
        );
        snapshot.insert(
            "mg2_score_max",
            SettingValue::Number(defaults::MG2_SCORE_MAX as f64),
        );

        snapshot.insert("mg3_enabled", SettingValue::Bool(defaults::MG3_ENABLED));
        snapshot.insert("mg3_rounds", SettingValue::Number(defaults::MG3_ROUNDS));
        snapshot.insert(
            "mg3_time_normal",
            SettingValue::Number(defaults::MG3_TIME_NORMAL),
        );
        snapshot.insert(
            "mg3_time_hard",
            SettingValue::Number(defaults::MG3_TIME_HARD),
        );
        snapshot.insert(
            "mg3_score_round",
            SettingValue::Number(defaults::MG3_SCORE_ROUND as f64),
        );

        snapshot.insert("mg4_enabled", SettingValue::Bool(defaults::MG4_ENABLED));
        snapshot.insert(
            "mg4_time_normal",
            SettingValue::Number(defaults::MG4_TIME_NORMAL),
        );
        snapshot.insert(
            "mg4_time_hard",
            SettingValue::Number(defaults::MG4_TIME_HARD),
        );
        snapshot.insert(
            "mg4_score_max",
            SettingValue::Number(defaults::MG4_SCORE_MAX as f64),
        );

        snapshot.insert("mg5_enabled", SettingValue::Bool(defaults::MG5_ENABLED));
        snapshot.insert(
            "mg5_time_normal",
            SettingValue::Number(defaults::MG5_TIME_NORMAL),
        );
        snapshot.insert(
            "mg5_time_hard",
            SettingValue::Number(defaults::MG5_TIME_HARD),
        );
        snapshot.insert(
            "mg5_score_hit",
            SettingValue::Number(defaults::MG5_SCORE_HIT as f64),
        );

        snapshot
    }

    /// Type raw store rows and merge them over the default mapping
    pub fn from_records(records: Vec<SettingRecord>) -> Self {
        let mut snapshot = Self::defaults();
        for record in records {
            snapshot
                .0
                .insert(record.key, SettingValue::parse(&record.value));
        }
        snapshot
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.0.get(key)
    }

    /// Boolean value of `key`, if present and boolean
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(SettingValue::as_bool)
    }

    /// Numeric value of `key`, if present and numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(SettingValue::as_number)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SettingValue) {
        self.0.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<SettingValue> {
        self.0.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Partial set of canonical changes; one independent upsert per entry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsChange(BTreeMap<String, SettingValue>);

impl SettingsChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: SettingValue) {
        self.0.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SettingValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Mobile-shaped settings
///
/// Every `mgN_enabled` flag is renamed to `minigameN_enabled` and the score
/// fields are always populated. The canonical global `minigame_enabled`
/// flag has no mobile counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct MobileSettings {
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

/// Partial mobile-side update
///
/// Enabled flags accept either the mobile name (`minigameN_enabled`) or the
/// canonical name (`mgN_enabled`); the mobile name wins when both are
/// present. Unrecognized payload keys never reach this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MobilePatch {
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

impl From<MobileSettings> for MobilePatch {
    fn from(settings: MobileSettings) -> Self {
        Self {
            minimum_passing_score: Some(settings.minimum_passing_score),
            hard_mode_threshold: Some(settings.hard_mode_threshold),

            minigame1_enabled: Some(settings.minigame1_enabled),
            mg1_enabled: None,
            mg1_speed_normal: Some(settings.mg1_speed_normal),
            mg1_speed_hard: Some(settings.mg1_speed_hard),

            minigame2_enabled: Some(settings.minigame2_enabled),
            mg2_enabled: None,
            mg2_rounds: Some(settings.mg2_rounds),
            mg2_speed_normal: Some(settings.mg2_speed_normal),
            mg2_speed_hard: Some(settings.mg2_speed_hard),

            minigame3_enabled: Some(settings.minigame3_enabled),
            mg3_enabled: None,
            mg3_rounds: Some(settings.mg3_rounds),
            mg3_time_normal: Some(settings.mg3_time_normal),
            mg3_time_hard: Some(settings.mg3_time_hard),

            minigame4_enabled: Some(settings.minigame4_enabled),
            mg4_enabled: None,
            mg4_time_normal: Some(settings.mg4_time_normal),
            mg4_time_hard: Some(settings.mg4_time_hard),

            minigame5_enabled: Some(settings.minigame5_enabled),
            mg5_enabled: None,
            mg5_time_normal: Some(settings.mg5_time_normal),
            mg5_time_hard: Some(settings.mg5_time_hard),

            mg1_score_hit: Some(settings.mg1_score_hit as f64),
            mg2_score_max: Some(settings.mg2_score_max as f64),
            mg3_score_round: Some(settings.mg3_score_round as f64),
            mg4_score_max: Some(settings.mg4_score_max as f64),
            mg5_score_hit: Some(settings.mg5_score_hit as f64),
        }
    }
}

/// Audit entry recorded when a stored setting value actually changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub action: String,
    pub description: String,
}

impl Activity {
    /// Entry for a changed setting; `previous` is `None` when the key had
    /// no stored row yet.
    pub fn setting_updated(key: &str, previous: Option<&str>, current: &str) -> Self {
        Self {
            action: "setting_updated".to_string(),
            description: format!(
                "Setting \"{}\" changed from \"{}\" to \"{}\"",
                key,
                previous.unwrap_or("empty"),
                current
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_types_boolean_text() {
        assert_eq!(SettingValue::parse("true"), SettingValue::Bool(true));
        assert_eq!(SettingValue::parse("false"), SettingValue::Bool(false));
    }

    #[test]
    fn parse_types_numeric_text() {
        assert_eq!(SettingValue::parse("2500"), SettingValue::Number(2500.0));
        assert_eq!(SettingValue::parse("12.5"), SettingValue::Number(12.5));
        assert_eq!(SettingValue::parse("-3"), SettingValue::Number(-3.0));
    }

    #[test]
    fn parse_keeps_everything_else_as_text() {
        assert_eq!(
            SettingValue::parse("welcome"),
            SettingValue::Text("welcome".to_string())
        );
        assert_eq!(SettingValue::parse(""), SettingValue::Text(String::new()));
        // Rust would parse these as floats but they are not clean numbers
        assert_eq!(
            SettingValue::parse("NaN"),
            SettingValue::Text("NaN".to_string())
        );
        assert_eq!(
            SettingValue::parse("inf"),
            SettingValue::Text("inf".to_string())
        );
    }

    #[test]
    fn storage_value_is_the_inverse_of_parse() {
        for raw in ["true", "false", "2500", "12.5", "welcome"] {
            assert_eq!(SettingValue::parse(raw).storage_value(), raw);
        }
    }

    #[test]
    fn integral_numbers_are_stored_without_decimal_point() {
        assert_eq!(SettingValue::Number(2500.0).storage_value(), "2500");
        assert_eq!(SettingValue::Number(0.5).storage_value(), "0.5");
    }

    #[test]
    fn defaults_cover_the_whole_mapping() {
        let snapshot = Snapshot::defaults();
        assert_eq!(snapshot.len(), 25);
        assert_eq!(snapshot.number("minimum_passing_score"), Some(70.0));
        assert_eq!(snapshot.flag("minigame_enabled"), Some(true));
        assert_eq!(snapshot.number("mg2_score_max"), Some(1000.0));
    }

    #[test]
    fn records_are_typed_and_merged_over_defaults() {
        let snapshot = Snapshot::from_records(vec![
            SettingRecord {
                key: "mg1_enabled".to_string(),
                value: "false".to_string(),
            },
            SettingRecord {
                key: "greeting".to_string(),
                value: "hello".to_string(),
            },
        ]);

        assert_eq!(snapshot.flag("mg1_enabled"), Some(false));
        assert_eq!(
            snapshot.get("greeting"),
            Some(&SettingValue::Text("hello".to_string()))
        );
        // untouched defaults stay present
        assert_eq!(snapshot.number("mg1_speed_hard"), Some(1000.0));
        assert_eq!(snapshot.len(), 26);
    }

    #[test]
    fn activity_describes_the_transition() {
        let activity = Activity::setting_updated("mg3_rounds", Some("5"), "7");
        assert_eq!(activity.action, "setting_updated");
        assert_eq!(
            activity.description,
            "Setting \"mg3_rounds\" changed from \"5\" to \"7\""
        );

        let first_write = Activity::setting_updated("mg1_enabled", None, "true");
        assert_eq!(
            first_write.description,
            "Setting \"mg1_enabled\" changed from \"empty\" to \"true\""
        );
    }
}
