#![allow(dead_code)]

use oxide_dberror::{ErrorTranslator, NativeError, TypedError};
use oxide_sqlgen::DialectKind;
use serde_json::{Map, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn translate(kind: DialectKind, err: NativeError) -> TypedError {
    init_tracing();
    ErrorTranslator::new(kind).translate(err)
}

pub fn object(value: Value) -> Map<String, Value> {
    value
        .as_object()
        .cloned()
        .unwrap_or_else(|| panic!("expected a JSON object, got {value}"))
}

/// Fields of a unique violation, panicking on any other variant.
pub fn unique_fields(err: TypedError) -> Vec<(String, Value)> {
    match err {
        TypedError::UniqueConstraint { fields, .. } => fields,
        other => panic!("expected a unique violation, got {other:?}"),
    }
}
