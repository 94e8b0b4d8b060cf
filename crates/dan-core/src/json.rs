//! JSON transcoding for DAN values.
//!
//! DAN → JSON builds a `serde_json::Value` with [`to_json`], which every JSON
//! output path uses: objects become JSON objects in insertion order, arrays and
//! tables become JSON arrays, and every number is written as a float. JSON → DAN maps `null` to
//! [`Value::Null`] and arrays to plain [`Value::Array`]s; the encoder renders an
//! array of objects as a table anyway.

use crate::error::{DanError, Result};
use crate::value::{Object, Value};
use serde_json::Value as JsonValue;

/// Convert a decoded document into a `serde_json::Value`.
pub fn to_json(object: &Object) -> JsonValue {
    JsonValue::Object(
        object
            .iter()
            .map(|(key, value)| (key.clone(), value_to_json(value)))
            .collect(),
    )
}

/// Pretty-printed JSON (two-space indent), as the CLI prints it.
pub fn to_json_string_pretty(object: &Object) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_json(object))?)
}

/// Parse a JSON document whose root is an object.
pub fn from_json_str(json: &str) -> Result<Object> {
    root_object(serde_json::from_str(json)?)
}

pub fn from_json_slice(json: &[u8]) -> Result<Object> {
    root_object(serde_json::from_slice(json)?)
}

fn root_object(json: JsonValue) -> Result<Object> {
    match Value::from(json) {
        Value::Object(map) => Ok(map),
        other => Err(DanError::JsonRoot {
            found: other.type_name(),
        }),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        // Non-finite numbers have no JSON form.
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
        Value::Object(map) => to_json(map),
        Value::Table(table) => JsonValue::Array(table.iter().map(to_json).collect()),
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
