//! # oxide-rows
//!
//! Rebuilds nested objects from flat result rows whose column aliases use
//! dots and brackets, such as `author.name` or `tags[0]`.
//!
//! This crate provides:
//! - A path tokenizer for dotted/bracketed aliases
//! - Keys precompiled once per result shape and reused for every row
//! - Writers and readers that walk nested JSON objects by path
//! - A free-list pool of row objects for tight materialization loops
//!
//! ```rust
//! use oxide_rows::{precompile_keys, transform_row_with_precompiled};
//! use serde_json::json;
//!
//! let keys = precompile_keys(["id", "tags[0]", "tags[1]"]).unwrap();
//! let row = json!({ "id": 1, "tags[0]": "a", "tags[1]": "b" });
//!
//! let nested = transform_row_with_precompiled(row.as_object().unwrap(), &keys);
//! assert_eq!(serde_json::Value::Object(nested), json!({ "id": 1, "tags": ["a", "b"] }));
//! ```

pub mod error;
pub mod path;
pub mod pool;
pub mod precompiled;
pub mod reconstructor;

pub use error::PathError;
pub use path::{get_by_path, set_by_path, tokenize_path, PathToken, MAX_ARRAY_INDEX};
pub use pool::{acquire_pooled_object, release_pooled_object, RowPool};
pub use precompiled::{
    flatten_row, precompile_keys, transform_row_into, transform_row_with_precompiled,
    PrecompiledKey, PrecompiledKeys,
};
pub use reconstructor::RowReconstructor;
