//! Response Envelope Unwrapping
//!
//! Endpoints disagree on shape: a bare array, `{customers: [...]}`,
//! `{data: [...]}` or `{data: {customers: [...]}}`. Lists are located by
//! walking that fallback chain; anything else is treated as "no data".
//! JSON `null` fields are dropped before decoding, so models fall back to
//! their `#[serde(default)]` values instead of rejecting the response.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;
use crate::logging;

const WRAPPER_KEYS: &[&str] = &["data", "items", "results"];

pub fn unwrap_collection<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>, ApiError> {
    match locate_array(body, key) {
        Some(array) => Ok(serde_json::from_value(drop_nulls(array))?),
        None => {
            logging::warn("API", format!("no '{}' collection in response, treating as empty", key));
            Ok(Vec::new())
        }
    }
}

fn locate_array(body: Value, key: &str) -> Option<Value> {
    match body {
        Value::Array(_) => Some(body),
        Value::Object(mut map) => {
            let keys = std::iter::once(key).chain(WRAPPER_KEYS.iter().copied());
            for candidate in keys {
                if let Some(inner) = map.remove(candidate) {
                    if let Some(found) = locate_array(inner, key) {
                        return Some(found);
                    }
                }
            }
            None
        }
        _ => None,
    }
}

/// Single record: `{invoice: {...}}`, `{data: {...}}`, or the record itself
pub fn unwrap_record<T: DeserializeOwned>(body: Value, key: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_value(drop_nulls(locate_record(body, key)))?)
}

/// Remove null object fields and null array elements, recursively
fn drop_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, drop_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().filter(|v| !v.is_null()).map(drop_nulls).collect()),
        other => other,
    }
}

fn locate_record(body: Value, key: &str) -> Value {
    match body {
        Value::Object(mut map) => {
            if let Some(inner @ Value::Object(_)) = map.remove(key) {
                return inner;
            }
            if let Some(inner @ Value::Object(_)) = map.remove("data") {
                return locate_record(inner, key);
            }
            Value::Object(map)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    fn ids(rows: Vec<Row>) -> Vec<u32> {
        rows.into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_bare_array() {
        let rows: Vec<Row> = unwrap_collection(json!([{"id": 1}, {"id": 2}]), "customers").unwrap();
        assert_eq!(ids(rows), vec![1, 2]);
    }

    #[test]
    fn test_keyed_and_data_wrappers() {
        let keyed: Vec<Row> = unwrap_collection(json!({"customers": [{"id": 3}]}), "customers").unwrap();
        assert_eq!(ids(keyed), vec![3]);

        let data: Vec<Row> = unwrap_collection(json!({"data": [{"id": 4}], "total": 1}), "customers").unwrap();
        assert_eq!(ids(data), vec![4]);

        let nested: Vec<Row> = unwrap_collection(json!({"data": {"customers": [{"id": 5}]}}), "customers").unwrap();
        assert_eq!(ids(nested), vec![5]);
    }

    #[test]
    fn test_key_wins_over_data() {
        let rows: Vec<Row> = unwrap_collection(json!({"data": [{"id": 1}], "sites": [{"id": 9}]}), "sites").unwrap();
        assert_eq!(ids(rows), vec![9]);
    }

    #[test]
    fn test_unknown_shapes_are_empty() {
        for body in [json!(null), json!({"ok": true}), json!("text"), json!({"data": {"other": []}})] {
            let rows: Vec<Row> = unwrap_collection(body, "customers").unwrap();
            assert!(rows.is_empty());
        }
    }

    #[test]
    fn test_bad_elements_are_decode_errors() {
        let result: Result<Vec<Row>, ApiError> = unwrap_collection(json!([{"id": "x"}]), "customers");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Named {
        id: u32,
        name: String,
        tags: Vec<String>,
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let rows: Vec<Named> = unwrap_collection(
            json!({"customers": [{"id": 1, "name": "Lot A", "tags": ["salt"]}, {"id": 2, "name": null, "tags": [null, "plow"]}, null]}),
            "customers",
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], Named { id: 2, name: String::new(), tags: vec!["plow".to_string()] });

        let record: Named = unwrap_record(json!({"customer": {"id": 3, "name": null, "tags": null}}), "customer").unwrap();
        assert_eq!(record, Named { id: 3, ..Default::default() });
    }

    #[test]
    fn test_record_wrappers() {
        let plain: Row = unwrap_record(json!({"id": 1}), "invoice").unwrap();
        let keyed: Row = unwrap_record(json!({"invoice": {"id": 2}}), "invoice").unwrap();
        let data: Row = unwrap_record(json!({"data": {"id": 3}}), "invoice").unwrap();
        let both: Row = unwrap_record(json!({"data": {"invoice": {"id": 4}}}), "invoice").unwrap();
        assert_eq!((plain.id, keyed.id, data.id, both.id), (1, 2, 3, 4));
    }
}
