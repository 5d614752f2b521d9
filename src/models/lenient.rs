//! Lenient deserializers for values coming out of the PHP backend
//!
//! The backend is inconsistent about scalar types: ids and counters can be
//! numbers or numeric strings, flags can be `true`, `1`, `"1"` or `"true"`,
//! and optional text is frequently `null`. These helpers accept every shape
//! we have seen and fall back to a default instead of failing the whole
//! record.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

/// Interpret a JSON value as a boolean flag
pub fn value_as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "y" | "on" => Some(true),
            "0" | "false" | "no" | "n" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Interpret a JSON value as an unsigned integer
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.fract() == 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Interpret a JSON value as a floating point number
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Interpret a JSON value as text; numbers are rendered, null becomes `None`
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_bool(&value).unwrap_or(false))
}

pub fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value).unwrap_or(0))
}

pub fn optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value))
}

pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

/// Text that must never be null once it reaches an editable form
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_string(&value).unwrap_or_default())
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_string(&value).filter(|s| !s.is_empty()))
}

/// Enum parsed through its `FromStr`; unknown text and null become the default
pub fn parsed_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
    T::Err: Display,
{
    let value = Value::deserialize(deserializer)?;
    let Some(text) = value_as_string(&value) else {
        return Ok(T::default());
    };
    match text.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("{}, using default", e);
            Ok(T::default())
        }
    }
}

/// Fold alternate spellings of a field into `canonical`.
///
/// The first non-null alias is used when `canonical` is missing or null;
/// all aliases are removed so strict deserialization does not see a
/// duplicate field.
pub fn canonicalize(map: &mut serde_json::Map<String, Value>, canonical: &str, aliases: &[&str]) {
    let mut replacement = None;
    for alias in aliases {
        if let Some(value) = map.remove(*alias) {
            if replacement.is_none() && !value.is_null() {
                replacement = Some(value);
            }
        }
    }
    let missing = map.get(canonical).map_or(true, Value::is_null);
    if missing {
        if let Some(value) = replacement {
            map.insert(canonical.to_string(), value);
        }
    }
}

/// A list that may arrive as a JSON array or as a JSON-encoded string
pub fn vec_or_json_string<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let value = match value {
        Value::String(s) => serde_json::from_str(&s).unwrap_or(Value::Null),
        other => other,
    };
    match value {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_php_style_flags() {
        assert_eq!(value_as_bool(&json!(1)), Some(true));
        assert_eq!(value_as_bool(&json!("0")), Some(false));
        assert_eq!(value_as_bool(&json!("TRUE")), Some(true));
        assert_eq!(value_as_bool(&json!(null)), None);
        assert_eq!(value_as_bool(&json!("maybe")), None);
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(value_as_u64(&json!("42")), Some(42));
        assert_eq!(value_as_u64(&json!(7.0)), Some(7));
        assert_eq!(value_as_u64(&json!(-3)), None);
        assert_eq!(value_as_f64(&json!("2.5")), Some(2.5));
        assert_eq!(value_as_string(&json!(12)), Some("12".to_string()));
    }

    #[test]
    fn test_parsed_or_default() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(deserialize_with = "parsed_or_default", default)]
            kind: crate::models::ReportType,
        }
        let row: Row = serde_json::from_value(json!({"kind": "FUMIGATION"})).unwrap();
        assert_eq!(row.kind, crate::models::ReportType::Fumigation);
        let row: Row = serde_json::from_value(json!({"kind": "termites"})).unwrap();
        assert_eq!(row.kind, crate::models::ReportType::Inspection);
        let row: Row = serde_json::from_value(json!({"kind": null})).unwrap();
        assert_eq!(row.kind, crate::models::ReportType::Inspection);
    }

    #[test]
    fn test_canonicalize_prefers_existing_field() {
        let mut map = json!({"name": "Kept", "company_name": "Dropped"})
            .as_object()
            .cloned()
            .unwrap();
        canonicalize(&mut map, "name", &["company_name"]);
        assert_eq!(map.get("name"), Some(&json!("Kept")));
        assert!(map.get("company_name").is_none());

        let mut map = json!({"company_name": "Moved"}).as_object().cloned().unwrap();
        canonicalize(&mut map, "name", &["company_name"]);
        assert_eq!(map.get("name"), Some(&json!("Moved")));
    }
}
