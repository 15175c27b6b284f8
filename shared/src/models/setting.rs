//! Settings Model
//!
//! Settings are persisted as flat key/value text rows. The typed
//! [`OrderingSettings`] view replaces the old convention-based string
//! coercion ("keys ending in Percent are numbers") with declared fields;
//! unknown keys pass through untouched in the flattened API response.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings flag: persist orders to the database
pub const KEY_SAVE_TO_DATABASE: &str = "saveToDatabase";
/// Settings flag: append orders to the spreadsheet ledger
pub const KEY_SAVE_TO_SHEET: &str = "saveToSheet";
/// Service fee percentage applied by the frontend
pub const KEY_SERVICE_FEE_PERCENT: &str = "serviceFeePercent";

/// One key/value settings row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Typed view over the settings rows consulted by the order workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderingSettings {
    pub save_to_database: bool,
    pub save_to_sheet: bool,
    pub service_fee_percent: f64,
}

impl Default for OrderingSettings {
    fn default() -> Self {
        // Both persistence targets default to enabled: a fresh install with an
        // empty settings table must still accept orders.
        Self {
            save_to_database: true,
            save_to_sheet: true,
            service_fee_percent: 0.0,
        }
    }
}

impl OrderingSettings {
    /// Build the typed view from raw settings rows, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_rows(rows: &[Setting]) -> Self {
        let mut settings = Self::default();
        for row in rows {
            match row.key.as_str() {
                KEY_SAVE_TO_DATABASE => settings.save_to_database = parse_bool(&row.value),
                KEY_SAVE_TO_SHEET => settings.save_to_sheet = parse_bool(&row.value),
                KEY_SERVICE_FEE_PERCENT => {
                    if let Ok(v) = row.value.trim().parse() {
                        settings.service_fee_percent = v;
                    }
                }
                _ => {}
            }
        }
        settings
    }

    /// At least one persistence target must be enabled for an order to be
    /// accepted.
    pub fn has_persistence_target(&self) -> bool {
        self.save_to_database || self.save_to_sheet
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.trim(), "true" | "1" | "yes" | "on")
}

/// Flatten raw settings rows into the JSON object returned by
/// `GET /api/settings`: typed keys become booleans/numbers, unknown keys pass
/// through as strings.
pub fn flatten_settings(rows: &[Setting]) -> BTreeMap<String, serde_json::Value> {
    let mut map = BTreeMap::new();
    for row in rows {
        let value = match row.key.as_str() {
            KEY_SAVE_TO_DATABASE | KEY_SAVE_TO_SHEET => {
                serde_json::Value::Bool(parse_bool(&row.value))
            }
            KEY_SERVICE_FEE_PERCENT => row
                .value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::String(row.value.clone())),
            _ => serde_json::Value::String(row.value.clone()),
        };
        map.insert(row.key.clone(), value);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, value: &str) -> Setting {
        Setting {
            key: key.into(),
            value: value.into(),
        }
    }

    #[test]
    fn defaults_enable_both_targets() {
        let settings = OrderingSettings::from_rows(&[]);
        assert!(settings.save_to_database);
        assert!(settings.save_to_sheet);
        assert!(settings.has_persistence_target());
    }

    #[test]
    fn flags_parse_common_truthy_forms() {
        let settings = OrderingSettings::from_rows(&[
            row(KEY_SAVE_TO_DATABASE, "false"),
            row(KEY_SAVE_TO_SHEET, "1"),
        ]);
        assert!(!settings.save_to_database);
        assert!(settings.save_to_sheet);
    }

    #[test]
    fn both_disabled_means_no_target() {
        let settings = OrderingSettings::from_rows(&[
            row(KEY_SAVE_TO_DATABASE, "false"),
            row(KEY_SAVE_TO_SHEET, "false"),
        ]);
        assert!(!settings.has_persistence_target());
    }

    #[test]
    fn fee_percent_parses_as_number() {
        let settings = OrderingSettings::from_rows(&[row(KEY_SERVICE_FEE_PERCENT, "10")]);
        assert_eq!(settings.service_fee_percent, 10.0);
    }

    #[test]
    fn flatten_types_known_keys_and_passes_unknown_through() {
        let map = flatten_settings(&[
            row(KEY_SAVE_TO_SHEET, "true"),
            row(KEY_SERVICE_FEE_PERCENT, "3.5"),
            row("storeName", "好食堂"),
        ]);
        assert_eq!(map["saveToSheet"], serde_json::json!(true));
        assert_eq!(map["serviceFeePercent"], serde_json::json!(3.5));
        assert_eq!(map["storeName"], serde_json::json!("好食堂"));
    }
}
