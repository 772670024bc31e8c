//! Property tests for flat row reconstruction.
//!
//! Property: for rows whose aliases describe a consistent shape,
//! flattening the reconstructed object along the same aliases yields the
//! original row.

mod common;

use common::keys_of;
use oxide_rows::{
    flatten_row, tokenize_path, transform_row_with_precompiled, PathError, PathToken, MAX_ARRAY_INDEX,
};
use proptest::prelude::*;
use serde_json::{Map, Value};

// ============================================================================
// STRATEGIES
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z ]{0,12}".prop_map(Value::String),
    ]
}

/// Aliases of three non-overlapping shapes: `c{n}`, `o{n}.f{m}` and
/// `g{n}[{i}].f{m}`.
fn arb_alias() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..4u8).prop_map(|n| format!("c{n}")),
        (0..3u8, 0..3u8).prop_map(|(n, m)| format!("o{n}.f{m}")),
        (0..3u8, 0..4usize, 0..3u8).prop_map(|(n, i, m)| format!("g{n}[{i}].f{m}")),
    ]
}

fn arb_row() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(arb_alias(), arb_scalar(), 0..16)
        .prop_map(|entries| entries.into_iter().collect())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #[test]
    fn prop_flatten_inverts_transform(row in arb_row()) {
        let keys = keys_of(&row);
        let nested = transform_row_with_precompiled(&row, &keys);
        prop_assert_eq!(flatten_row(&nested, &keys), row);
    }

    #[test]
    fn prop_transform_is_deterministic(row in arb_row()) {
        let keys = keys_of(&row);
        prop_assert_eq!(
            transform_row_with_precompiled(&row, &keys),
            transform_row_with_precompiled(&row, &keys)
        );
    }

    #[test]
    fn prop_tokenizer_never_emits_empty_keys(segments in prop::collection::vec("[a-z]{0,3}", 0..6)) {
        let key = segments.join(".");
        let tokens = tokenize_path(&key).unwrap_or_else(|e| panic!("Failed to tokenize {key}: {e}"));
        prop_assert!(tokens.iter().all(|t| !matches!(t, PathToken::Key(k) if k.is_empty())));
        prop_assert_eq!(tokens.len(), segments.iter().filter(|s| !s.is_empty()).count());
    }

    #[test]
    fn prop_indices_round_trip(index in 0..=MAX_ARRAY_INDEX) {
        let key = format!("arr[{index}]");
        let tokens = tokenize_path(&key).unwrap_or_else(|e| panic!("Failed to tokenize {key}: {e}"));
        prop_assert_eq!(tokens, vec![PathToken::from("arr"), PathToken::Index(index)]);
    }

    #[test]
    fn prop_indices_past_limit_are_rejected(index in (MAX_ARRAY_INDEX + 1)..=usize::MAX) {
        let key = format!("arr[{index}]");
        prop_assert_eq!(tokenize_path(&key), Err(PathError::IndexOutOfRange(key.clone())));
    }
}
