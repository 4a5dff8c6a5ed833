//! Cache Store Module
//!
//! Unsynchronized key-value engine shared by both lock variants. Every method
//! here runs with the owning variant's lock already held.

use std::collections::HashMap;

use tracing::trace;

// == Cache Store ==
/// Plain key-value storage behind the cache locks.
#[derive(Debug, Clone)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, V>,
}

impl<V> Default for CacheStore<V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates an empty store with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    // == Get ==
    /// Returns a clone of the stored value, if any.
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    // == Has ==
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Set ==
    /// Stores a value, overwriting any previous one.
    pub fn set(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    // == Delete ==
    /// Removes a key. Absent keys are ignored.
    pub fn delete(&mut self, key: &str) {
        self.entries.remove(key);
    }

    // == Flush ==
    /// Replaces the backing map with a fresh empty one.
    pub fn flush(&mut self) {
        self.entries = HashMap::new();
    }

    // == Snapshots ==
    /// Returns an owned, unordered copy of all keys.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Returns an owned, unordered copy of all values.
    pub fn values(&self) -> Vec<V> {
        self.entries.values().cloned().collect()
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Range ==
    /// Visits entries until `visit` returns false.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        for (key, value) in &self.entries {
            if !visit(key, value) {
                break;
            }
        }
    }

    // == Set Default ==
    /// Stores `value` only when `key` is absent.
    pub fn set_default(&mut self, key: String, value: V) {
        self.entries.entry(key).or_insert(value);
    }

    // == Get Default ==
    /// Returns the stored value, or `fallback` without storing it.
    pub fn get_default(&self, key: &str, fallback: V) -> V {
        self.get(key).unwrap_or(fallback)
    }

    // == Get Or Set ==
    /// Returns the stored value, storing `value` first when `key` is absent.
    pub fn get_or_set(&mut self, key: &str, value: V) -> V {
        self.get_or_set_with(key, || value)
    }

    /// Returns the stored value, storing the result of `compute` when `key`
    /// is absent. `compute` is called at most once and never on a hit.
    ///
    /// The key is only inserted after `compute` returns, so a panic inside it
    /// leaves the store without an entry for `key`.
    pub fn get_or_set_with<F>(&mut self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(existing) = self.entries.get(key) {
            return existing.clone();
        }

        trace!(key, "cache miss, computing value");
        let value = compute();
        self.entries.insert(key.to_owned(), value.clone());
        value
    }
}
