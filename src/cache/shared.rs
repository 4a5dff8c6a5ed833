//! Shared Cache Module
//!
//! Cache variant backed by a read/write lock so that lookups run in parallel.

use parking_lot::RwLock;

use crate::cache::{CacheStore, KeyValueCache};

// == Shared Cache ==
/// Cache guarded by a read/write lock.
///
/// `get`, `has`, `keys`, `values`, `len`, `range` and `get_default` take the
/// read side and run concurrently with one another. Everything that may insert
/// or remove (including the whole `get_or_set` family) takes the write side.
/// A `compute` closure runs under the write lock, so misses for different keys
/// still serialize against each other.
#[derive(Debug)]
pub struct SharedCache<V> {
    inner: RwLock<CacheStore<V>>,
}

impl<V> Default for SharedCache<V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(CacheStore::default()),
        }
    }
}

impl<V: Clone> SharedCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(CacheStore::new()),
        }
    }

    /// Creates an empty cache with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(CacheStore::with_capacity(capacity)),
        }
    }
}

impl<V: Clone + Send + Sync> KeyValueCache<V> for SharedCache<V> {
    // == Readers ==
    fn get(&self, key: &str) -> Option<V> {
        self.inner.read().get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.inner.read().has(key)
    }

    fn keys(&self) -> Vec<String> {
        self.inner.read().keys()
    }

    fn values(&self) -> Vec<V> {
        self.inner.read().values()
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Holds the read lock while visiting. Calling back into this cache from
    /// `visit` can deadlock once a writer is queued.
    fn range<F>(&self, visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        self.inner.read().range(visit);
    }

    fn get_default(&self, key: &str, fallback: V) -> V {
        self.inner.read().get_default(key, fallback)
    }

    // == Writers ==
    fn set(&self, key: impl Into<String>, value: V) {
        self.inner.write().set(key.into(), value);
    }

    fn delete(&self, key: &str) {
        self.inner.write().delete(key);
    }

    fn flush(&self) {
        self.inner.write().flush();
    }

    fn set_default(&self, key: impl Into<String>, value: V) {
        self.inner.write().set_default(key.into(), value);
    }

    fn get_or_set(&self, key: &str, value: V) -> V {
        self.inner.write().get_or_set(key, value)
    }

    fn get_or_set_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.inner.write().get_or_set_with(key, compute)
    }
}
