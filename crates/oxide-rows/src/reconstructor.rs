//! Per-stream row reconstruction.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::error::PathError;
use crate::path::set_by_path;
use crate::pool::RowPool;
use crate::precompiled::{precompile_keys, transform_row_into, PrecompiledKeys};

/// Rebuilds nested objects for every row of one result stream.
///
/// The aliases of the first row are precompiled and reused; columns that
/// show up later are compiled once and added to the set. Output objects
/// come from a [`RowPool`] and can be handed back with
/// [`recycle`](Self::recycle) once the caller is done with them.
///
/// ```
/// use oxide_rows::RowReconstructor;
/// use serde_json::json;
///
/// let mut rows = RowReconstructor::new();
/// let flat = json!({ "id": 1, "author.name": "Ada" });
/// let nested = rows.reconstruct(flat.as_object().unwrap()).unwrap();
///
/// assert_eq!(
///     serde_json::Value::Object(nested),
///     json!({ "id": 1, "author": { "name": "Ada" } })
/// );
/// ```
#[derive(Debug, Default)]
pub struct RowReconstructor {
    keys: Option<PrecompiledKeys>,
    field_map: HashMap<String, String>,
    pool: RowPool,
}

impl RowReconstructor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from aliases that are already compiled.
    #[must_use]
    pub fn with_keys(keys: PrecompiledKeys) -> Self {
        Self {
            keys: Some(keys),
            ..Self::default()
        }
    }

    /// Renames row columns (`column -> alias`) before nesting.
    #[must_use]
    pub fn with_field_map(mut self, field_map: HashMap<String, String>) -> Self {
        self.field_map = field_map;
        self
    }

    /// The aliases compiled so far.
    #[must_use]
    pub const fn keys(&self) -> Option<&PrecompiledKeys> {
        self.keys.as_ref()
    }

    /// Rebuilds the nested object for one row.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when a column alias cannot be tokenized.
    pub fn reconstruct(&mut self, row: &Map<String, Value>) -> Result<Map<String, Value>, PathError> {
        let row = remap_fields(row, &self.field_map);

        let keys = match self.keys.take() {
            Some(keys) => keys,
            None => precompile_keys(row.keys())?,
        };
        let keys = self.keys.insert(keys);

        let mut out = self.pool.acquire();
        transform_row_into(&row, keys, &mut out);

        for (key, value) in row.iter() {
            if !keys.contains(key) {
                let path = match keys.insert(key) {
                    Ok(path) => path,
                    Err(err) => {
                        self.pool.release(out);
                        return Err(err);
                    }
                };
                set_by_path(&mut out, path, value.clone());
            }
        }

        Ok(out)
    }

    /// Rebuilds every row of a batch.
    ///
    /// # Errors
    ///
    /// Stops at the first row with an alias that cannot be tokenized.
    pub fn reconstruct_all(
        &mut self,
        rows: &[Map<String, Value>],
    ) -> Result<Vec<Map<String, Value>>, PathError> {
        rows.iter().map(|row| self.reconstruct(row)).collect()
    }

    /// Hands an object back for reuse by a later row.
    pub fn recycle(&mut self, object: Map<String, Value>) {
        self.pool.release(object);
    }

    /// Number of objects waiting in the pool.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }
}

fn remap_fields<'a>(
    row: &'a Map<String, Value>,
    field_map: &HashMap<String, String>,
) -> Cow<'a, Map<String, Value>> {
    if field_map.is_empty() {
        return Cow::Borrowed(row);
    }
    let mut output = row.clone();
    for (field, name) in field_map {
        if field != name {
            if let Some(value) = output.remove(field) {
                output.insert(name.clone(), value);
            }
        }
    }
    Cow::Owned(output)
}
