#![allow(dead_code)]

use oxide_rows::{precompile_keys, PrecompiledKeys};
use serde_json::{Map, Value};

pub fn row(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected a JSON object, got {other}"),
    }
}

pub fn keys_of(row: &Map<String, Value>) -> PrecompiledKeys {
    precompile_keys(row.keys())
        .unwrap_or_else(|e| panic!("Failed to precompile keys of {row:?}\nError: {e}"))
}
