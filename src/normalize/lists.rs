//! Coercion of tag-like fields into `Vec<String>`
//!
//! `station_condition`, `treated_areas` and `treated_for` show up as JSON
//! arrays, as JSON-encoded strings, or as comma/pipe-joined strings
//! depending on which endpoint produced them.

use serde_json::Value;

const SEPARATORS: [char; 2] = [',', '|'];

/// Normalize any of the accepted shapes into a list of trimmed, non-empty strings.
///
/// Order and duplicates are preserved. Anything unusable yields an empty list.
pub fn normalize_string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => strings_from_array(items),
        Value::String(raw) => parse_joined(raw),
        _ => Vec::new(),
    }
}

fn strings_from_array(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_str())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_joined(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => return strings_from_array(&items),
        Ok(Value::String(inner)) if inner != trimmed => return parse_joined(&inner),
        _ => {}
    }

    trimmed
        .split(SEPARATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accepts_every_shape() {
        let expected = vec!["cracked".to_string(), "dirty".to_string()];

        assert_eq!(normalize_string_list(&json!(["cracked", "dirty"])), expected);
        assert_eq!(normalize_string_list(&json!("[\"cracked\",\"dirty\"]")), expected);
        assert_eq!(normalize_string_list(&json!("cracked, dirty")), expected);
        assert_eq!(normalize_string_list(&json!("cracked|dirty")), expected);
        assert!(normalize_string_list(&json!(null)).is_empty());
        assert!(normalize_string_list(&json!("")).is_empty());
        assert!(normalize_string_list(&json!(12)).is_empty());
    }

    #[test]
    fn test_json_array_drops_non_strings() {
        assert_eq!(
            normalize_string_list(&json!("[\"kitchen\", 4, null, \"store\"]")),
            vec!["kitchen".to_string(), "store".to_string()]
        );
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        assert_eq!(
            normalize_string_list(&json!("rats, mice, rats")),
            vec!["rats".to_string(), "mice".to_string(), "rats".to_string()]
        );
    }

    #[test]
    fn test_invalid_json_falls_back_to_split() {
        assert_eq!(
            normalize_string_list(&json!("[broken, list")),
            vec!["[broken".to_string(), "list".to_string()]
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            json!(["a", " b ", ""]),
            json!("[\"x\",\"y\"]"),
            json!("one,two|three"),
            json!(null),
        ];
        for input in inputs {
            let once = normalize_string_list(&input);
            let twice = normalize_string_list(&json!(once));
            assert_eq!(once, twice);
        }
    }
}
