// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Suggested activity model and its validation gate.
//!
//! Model output is never trusted as-is: candidates are parsed into an untyped
//! `serde_json::Value` first and only become an [`ActivityRecord`] after
//! [`ActivityRecord::from_value`] accepts them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Category used for the synthetic fallback record.
pub const PLACEHOLDER_CATEGORY: &str = "Sightseeing";

const ACTIVITY_KEYS: &[&str] = &["activity"];
const CATEGORY_KEYS: &[&str] = &["type", "category"];
const DESCRIPTION_KEYS: &[&str] = &["description"];
const LATITUDE_KEYS: &[&str] = &["lat", "latitude"];
const LONGITUDE_KEYS: &[&str] = &["long", "lng", "lon", "longitude"];

/// One suggested activity in a day itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityRecord {
    /// Short title
    pub activity: String,
    /// Free-text classification
    #[serde(rename = "type", alias = "category")]
    pub category: String,
    /// Free-text summary
    pub description: String,
    /// Latitude in degrees (0 together with longitude 0 means unknown)
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    /// Longitude in degrees
    #[serde(rename = "long", alias = "longitude")]
    pub longitude: f64,
}

/// Why a candidate was refused by the validation gate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordRejection {
    #[error("candidate is not a JSON object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' must be a string")]
    NotAString(&'static str),

    #[error("field '{0}' must not be empty")]
    EmptyString(&'static str),

    #[error("field '{0}' must be a number")]
    NotANumber(&'static str),
}

impl ActivityRecord {
    /// Validate a loosely-structured candidate and convert it to a record.
    ///
    /// All five fields must be present: three non-empty strings and two JSON
    /// numbers. Coordinates given as strings (`"48.85"`) are rejected.
    pub fn from_value(value: &Value) -> Result<Self, RecordRejection> {
        let obj = value.as_object().ok_or(RecordRejection::NotAnObject)?;

        Ok(Self {
            activity: required_string(obj, "activity", ACTIVITY_KEYS)?,
            category: required_string(obj, "type", CATEGORY_KEYS)?,
            description: required_string(obj, "description", DESCRIPTION_KEYS)?,
            latitude: required_number(obj, "lat", LATITUDE_KEYS)?,
            longitude: required_number(obj, "long", LONGITUDE_KEYS)?,
        })
    }

    /// The synthetic record shown when extraction yields nothing usable.
    pub fn placeholder(place: &str) -> Self {
        Self {
            activity: format!("Explore {}", place),
            category: PLACEHOLDER_CATEGORY.to_string(),
            description: format!("A general tour of {}", place),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    /// Whether this record has a usable location. `(0, 0)` is the "unknown" sentinel.
    pub fn has_location(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }
}

/// First non-null value under any of `keys`.
fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| obj.get(*k).filter(|v| !v.is_null()))
}

fn required_string(
    obj: &Map<String, Value>,
    field: &'static str,
    keys: &[&str],
) -> Result<String, RecordRejection> {
    let raw = lookup(obj, keys)
        .ok_or(RecordRejection::MissingField(field))?
        .as_str()
        .ok_or(RecordRejection::NotAString(field))?
        .trim();

    if raw.is_empty() {
        return Err(RecordRejection::EmptyString(field));
    }
    Ok(raw.to_string())
}

fn required_number(
    obj: &Map<String, Value>,
    field: &'static str,
    keys: &[&str],
) -> Result<f64, RecordRejection> {
    lookup(obj, keys)
        .ok_or(RecordRejection::MissingField(field))?
        .as_f64()
        .filter(|n| n.is_finite())
        .ok_or(RecordRejection::NotANumber(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eiffel() -> Value {
        json!({
            "activity": "Eiffel Tower",
            "type": "Landmark",
            "description": "Go up the tower",
            "lat": 48.8584,
            "long": 2.2945
        })
    }

    #[test]
    fn test_accepts_valid_record() {
        let record = ActivityRecord::from_value(&eiffel()).unwrap();
        assert_eq!(record.activity, "Eiffel Tower");
        assert_eq!(record.category, "Landmark");
        assert_eq!(record.latitude, 48.8584);
        assert_eq!(record.longitude, 2.2945);
    }

    #[test]
    fn test_accepts_zero_coordinates() {
        let mut value = eiffel();
        value["lat"] = json!(0);
        value["long"] = json!(0);
        let record = ActivityRecord::from_value(&value).unwrap();
        assert!(!record.has_location());
    }

    #[test]
    fn test_rejects_each_missing_field() {
        for field in ["activity", "type", "description", "lat", "long"] {
            let mut value = eiffel();
            value.as_object_mut().unwrap().remove(field);
            let err = ActivityRecord::from_value(&value).unwrap_err();
            assert_eq!(err, RecordRejection::MissingField(field), "field {}", field);
        }
    }

    #[test]
    fn test_rejects_string_coordinates() {
        let mut value = eiffel();
        value["lat"] = json!("48.8584");
        assert_eq!(
            ActivityRecord::from_value(&value).unwrap_err(),
            RecordRejection::NotANumber("lat")
        );

        let mut value = eiffel();
        value["long"] = json!("2.2945");
        assert_eq!(
            ActivityRecord::from_value(&value).unwrap_err(),
            RecordRejection::NotANumber("long")
        );
    }

    #[test]
    fn test_rejects_empty_and_non_string_text() {
        let mut value = eiffel();
        value["activity"] = json!("   ");
        assert_eq!(
            ActivityRecord::from_value(&value).unwrap_err(),
            RecordRejection::EmptyString("activity")
        );

        let mut value = eiffel();
        value["description"] = json!(42);
        assert_eq!(
            ActivityRecord::from_value(&value).unwrap_err(),
            RecordRejection::NotAString("description")
        );

        let mut value = eiffel();
        value["type"] = Value::Null;
        assert_eq!(
            ActivityRecord::from_value(&value).unwrap_err(),
            RecordRejection::MissingField("type")
        );
    }

    #[test]
    fn test_null_key_falls_back_to_alias() {
        let mut value = eiffel();
        value["type"] = Value::Null;
        value["category"] = json!("Museum");
        value["lat"] = Value::Null;
        value["latitude"] = json!(48.86);
        let record = ActivityRecord::from_value(&value).unwrap();
        assert_eq!(record.category, "Museum");
        assert_eq!(record.latitude, 48.86);
    }

    #[test]
    fn test_rejects_non_object() {
        assert_eq!(
            ActivityRecord::from_value(&json!(["Eiffel Tower"])).unwrap_err(),
            RecordRejection::NotAnObject
        );
    }

    #[test]
    fn test_accepts_field_aliases() {
        let value = json!({
            "activity": "Louvre",
            "category": "Museum",
            "description": "See the Mona Lisa",
            "latitude": 48.8606,
            "lng": 2.3376
        });
        let record = ActivityRecord::from_value(&value).unwrap();
        assert_eq!(record.category, "Museum");
        assert_eq!(record.longitude, 2.3376);
    }

    #[test]
    fn test_serializes_wire_names() {
        let record = ActivityRecord::from_value(&eiffel()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, eiffel());
    }

    #[test]
    fn test_placeholder_record() {
        let record = ActivityRecord::placeholder("Nowhere");
        assert_eq!(
            record,
            ActivityRecord {
                activity: "Explore Nowhere".to_string(),
                category: "Sightseeing".to_string(),
                description: "A general tour of Nowhere".to_string(),
                latitude: 0.0,
                longitude: 0.0,
            }
        );
    }
}
