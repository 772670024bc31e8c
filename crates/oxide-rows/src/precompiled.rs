//! Keys tokenized once per result shape and reused for every row.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PathError;
use crate::path::{get_by_path, set_by_path, tokenize_path, PathToken};

/// A result-column alias with its tokenized path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompiledKey {
    /// The alias as it appears in the row.
    pub source_key: String,
    /// Where the value goes in the nested object.
    pub path: Vec<PathToken>,
}

/// The tokenized aliases of one result shape, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecompiledKeys {
    compiled: Vec<PrecompiledKey>,
    index: HashMap<String, Vec<PathToken>>,
}

impl PrecompiledKeys {
    /// Keys in the order they were compiled.
    #[must_use]
    pub fn compiled(&self) -> &[PrecompiledKey] {
        &self.compiled
    }

    /// Looks up the path of an alias.
    #[must_use]
    pub fn path(&self, source_key: &str) -> Option<&[PathToken]> {
        self.index.get(source_key).map(Vec::as_slice)
    }

    /// Whether `source_key` has been compiled.
    #[must_use]
    pub fn contains(&self, source_key: &str) -> bool {
        self.index.contains_key(source_key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Tokenizes and appends one alias. Returns the compiled path; an alias
    /// that is already known is not compiled twice.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] when the alias cannot be tokenized.
    pub fn insert(&mut self, source_key: &str) -> Result<&[PathToken], PathError> {
        if !self.index.contains_key(source_key) {
            let path = tokenize_path(source_key)?;
            self.compiled.push(PrecompiledKey {
                source_key: source_key.to_string(),
                path: path.clone(),
            });
            self.index.insert(source_key.to_string(), path);
        }
        Ok(self.path(source_key).unwrap_or_default())
    }
}

/// Tokenizes every alias of a result shape once.
///
/// # Errors
///
/// Returns the first [`PathError`] raised by an alias.
pub fn precompile_keys<I, S>(keys: I) -> Result<PrecompiledKeys, PathError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut precompiled = PrecompiledKeys::default();
    for key in keys {
        precompiled.insert(key.as_ref())?;
    }
    debug!(keys = precompiled.len(), "Precompiled row keys");
    Ok(precompiled)
}

/// Rebuilds the nested object for one flat row.
///
/// Aliases missing from the row are skipped; `null` values are written.
#[must_use]
pub fn transform_row_with_precompiled(
    row: &Map<String, Value>,
    precompiled: &PrecompiledKeys,
) -> Map<String, Value> {
    let mut out = Map::new();
    transform_row_into(row, precompiled, &mut out);
    out
}

/// Like [`transform_row_with_precompiled`], writing into an existing object.
/// Entries already in `out` are kept unless a path overwrites them.
pub fn transform_row_into(
    row: &Map<String, Value>,
    precompiled: &PrecompiledKeys,
    out: &mut Map<String, Value>,
) {
    for key in &precompiled.compiled {
        if let Some(value) = row.get(&key.source_key) {
            set_by_path(out, &key.path, value.clone());
        }
    }
}

/// The inverse of [`transform_row_with_precompiled`]: reads every
/// precompiled path of `nested` back into a flat row.
#[must_use]
pub fn flatten_row(nested: &Map<String, Value>, precompiled: &PrecompiledKeys) -> Map<String, Value> {
    precompiled
        .compiled
        .iter()
        .filter_map(|key| {
            get_by_path(nested, &key.path).map(|value| (key.source_key.clone(), value.clone()))
        })
        .collect()
}
