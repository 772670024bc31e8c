//! A free list of row objects.
//!
//! A pool belongs to one row stream. It is used through `&mut` and is
//! neither `Clone` nor shared, so an object handed to a caller can never be
//! reused by a concurrent query.

use serde_json::{Map, Value};

/// Pops the most recently released object, cleared, or a new empty one.
#[must_use]
pub fn acquire_pooled_object(pool: &mut Vec<Map<String, Value>>) -> Map<String, Value> {
    pool.pop().map_or_else(Map::new, |mut object| {
        object.clear();
        object
    })
}

/// Returns an object to the pool.
pub fn release_pooled_object(pool: &mut Vec<Map<String, Value>>, object: Map<String, Value>) {
    pool.push(object);
}

/// LIFO pool of row objects.
#[derive(Debug, Default)]
pub struct RowPool {
    free: Vec<Map<String, Value>>,
}

impl RowPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes an empty object from the pool.
    #[must_use]
    pub fn acquire(&mut self) -> Map<String, Value> {
        acquire_pooled_object(&mut self.free)
    }

    /// Gives an object back once the caller is done with it.
    pub fn release(&mut self, object: Map<String, Value>) {
        release_pooled_object(&mut self.free, object);
    }

    /// Number of idle objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}
