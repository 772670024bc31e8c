//! Dotted/bracketed alias paths.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PathError;

/// Largest array index an alias may use. Writes past it are dropped so a
/// single column cannot force an arbitrarily large allocation.
pub const MAX_ARRAY_INDEX: usize = 1 << 20;

/// One segment of an alias path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathToken {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl fmt::Display for PathToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for PathToken {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathToken {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for PathToken {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

fn push_key(tokens: &mut Vec<PathToken>, segment: &str) {
    if !segment.is_empty() {
        tokens.push(PathToken::Key(segment.to_string()));
    }
}

/// Splits an alias such as `users[0].addresses[1].street` into tokens.
///
/// Empty segments from leading, trailing or repeated dots are dropped.
/// Brackets must hold a non-negative integer.
///
/// ```
/// use oxide_rows::{tokenize_path, PathToken};
///
/// assert_eq!(
///     tokenize_path("a.b[0]").unwrap(),
///     vec![PathToken::from("a"), PathToken::from("b"), PathToken::Index(0)]
/// );
/// assert!(tokenize_path("arr[foo]").is_err());
/// ```
///
/// # Errors
///
/// Returns a [`PathError`] for empty, unterminated or non-numeric brackets,
/// and for indices above [`MAX_ARRAY_INDEX`].
pub fn tokenize_path(key: &str) -> Result<Vec<PathToken>, PathError> {
    let bytes = key.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'.' => {
                push_key(&mut tokens, &key[start..i]);
                i += 1;
                start = i;
            }
            b'[' => {
                push_key(&mut tokens, &key[start..i]);
                let close = key[i + 1..]
                    .find(']')
                    .map(|offset| i + 1 + offset)
                    .ok_or_else(|| PathError::UnterminatedBracket(key.to_string()))?;
                let inner = &key[i + 1..close];
                if inner.is_empty() {
                    return Err(PathError::EmptyBracket(key.to_string()));
                }
                if !inner.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PathError::UnsupportedBracket(key.to_string()));
                }
                let index: usize = inner
                    .parse()
                    .map_err(|_| PathError::UnsupportedBracket(key.to_string()))?;
                if index > MAX_ARRAY_INDEX {
                    return Err(PathError::IndexOutOfRange(key.to_string()));
                }
                tokens.push(PathToken::Index(index));
                i = close + 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    push_key(&mut tokens, &key[start..]);

    Ok(tokens)
}

/// Writes `value` into `target` at `path`, creating containers on the way.
///
/// Missing, null or scalar intermediates become an array when the next
/// token is an index and an object otherwise; existing containers are kept
/// and extended. Array gaps are filled with `null`. An index leaf on an
/// object is written under its decimal key, while an index that would have
/// to descend through an object, or a key that would have to descend
/// through an array, drops the write. So does an index above
/// [`MAX_ARRAY_INDEX`].
pub fn set_by_path(target: &mut Map<String, Value>, path: &[PathToken], value: Value) {
    if path.is_empty() {
        return;
    }
    let mut root = Value::Object(core::mem::take(target));
    set_in(&mut root, path, value);
    if let Value::Object(map) = root {
        *target = map;
    }
}

fn set_in(node: &mut Value, path: &[PathToken], value: Value) {
    let Some((token, rest)) = path.split_first() else {
        *node = value;
        return;
    };

    if !matches!(node, Value::Object(_) | Value::Array(_)) {
        *node = match token {
            PathToken::Index(_) => Value::Array(Vec::new()),
            PathToken::Key(_) => Value::Object(Map::new()),
        };
    }

    match (node, token) {
        (Value::Object(map), PathToken::Key(key)) => {
            set_in(map.entry(key.clone()).or_insert(Value::Null), rest, value);
        }
        (Value::Object(map), PathToken::Index(index)) if rest.is_empty() => {
            map.insert(index.to_string(), value);
        }
        (Value::Array(items), PathToken::Index(index)) if *index <= MAX_ARRAY_INDEX => {
            if items.len() <= *index {
                items.resize(*index + 1, Value::Null);
            }
            if let Some(item) = items.get_mut(*index) {
                set_in(item, rest, value);
            }
        }
        _ => {}
    }
}

/// Reads the value at `path`, mirroring [`set_by_path`].
#[must_use]
pub fn get_by_path<'a>(target: &'a Map<String, Value>, path: &[PathToken]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut node = match first {
        PathToken::Key(key) => target.get(key)?,
        PathToken::Index(index) if rest.is_empty() => target.get(&index.to_string())?,
        PathToken::Index(_) => return None,
    };
    for (position, token) in rest.iter().enumerate() {
        let leaf = position + 1 == rest.len();
        node = match (node, token) {
            (Value::Object(map), PathToken::Key(key)) => map.get(key)?,
            (Value::Object(map), PathToken::Index(index)) if leaf => map.get(&index.to_string())?,
            (Value::Array(items), PathToken::Index(index)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(node)
}
