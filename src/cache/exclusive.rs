//! Exclusive Cache Module
//!
//! Cache variant where a single mutex serializes every operation.

use parking_lot::Mutex;

use crate::cache::{CacheStore, KeyValueCache};

// == Exclusive Cache ==
/// Cache guarded by one mutual-exclusion lock.
///
/// Reads and writes alike hold the mutex for their whole duration, including
/// any `compute` closure, so at most one caller touches the map at a time.
/// The mutex does not poison: a panicking `compute` releases it on unwind.
#[derive(Debug)]
pub struct ExclusiveCache<V> {
    inner: Mutex<CacheStore<V>>,
}

impl<V> Default for ExclusiveCache<V> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(CacheStore::default()),
        }
    }
}

impl<V: Clone> ExclusiveCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheStore::new()),
        }
    }

    /// Creates an empty cache with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(CacheStore::with_capacity(capacity)),
        }
    }
}

impl<V: Clone + Send + Sync> KeyValueCache<V> for ExclusiveCache<V> {
    fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key)
    }

    fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    fn set(&self, key: impl Into<String>, value: V) {
        self.inner.lock().set(key.into(), value);
    }

    fn delete(&self, key: &str) {
        self.inner.lock().delete(key);
    }

    fn flush(&self) {
        self.inner.lock().flush();
    }

    fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    fn values(&self) -> Vec<V> {
        self.inner.lock().values()
    }

    fn len(&self) -> usize {
        self.inner.lock().len()
    }

    fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    fn range<F>(&self, visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        self.inner.lock().range(visit);
    }

    fn set_default(&self, key: impl Into<String>, value: V) {
        self.inner.lock().set_default(key.into(), value);
    }

    fn get_default(&self, key: &str, fallback: V) -> V {
        self.inner.lock().get_default(key, fallback)
    }

    fn get_or_set(&self, key: &str, value: V) -> V {
        self.inner.lock().get_or_set(key, value)
    }

    fn get_or_set_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        self.inner.lock().get_or_set_with(key, compute)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_exclusive_basic_operations() {
        let cache = ExclusiveCache::<i32>::new();

        assert!(!cache.has("a"));
        assert_eq!(cache.get("a"), None);

        cache.set("a", 1);
        assert_eq!(cache.get("a"), Some(1));

        cache.delete("a");
        cache.delete("a");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_exclusive_instances_are_isolated() {
        let first = ExclusiveCache::<u32>::new();
        let second = ExclusiveCache::<u32>::new();

        first.set("id", 42);

        assert_eq!(first.get("id"), Some(42));
        assert_eq!(second.get("id"), None);
    }

    #[test]
    fn test_exclusive_compute_runs_once_under_contention() {
        let cache = Arc::new(ExclusiveCache::<usize>::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    cache.get_or_set_with("shared", || {
                        thread::sleep(Duration::from_millis(20));
                        calls.fetch_add(1, Ordering::SeqCst) + 100
                    })
                })
            })
            .collect();

        let results: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_exclusive_compute_blocks_unrelated_keys() {
        let cache = Arc::new(ExclusiveCache::<u32>::new());
        let started = Arc::new(Barrier::new(2));
        let reader_done = Arc::new(AtomicBool::new(false));

        let writer = {
            let cache = Arc::clone(&cache);
            let started = Arc::clone(&started);
            thread::spawn(move || {
                cache.get_or_set_with("slow", || {
                    started.wait();
                    thread::sleep(Duration::from_millis(100));
                    1
                })
            })
        };

        started.wait();
        let reader = {
            let cache = Arc::clone(&cache);
            let reader_done = Arc::clone(&reader_done);
            thread::spawn(move || {
                let value = cache.get("other");
                reader_done.store(true, Ordering::SeqCst);
                value
            })
        };

        thread::sleep(Duration::from_millis(30));
        assert!(!reader_done.load(Ordering::SeqCst));

        assert_eq!(writer.join().unwrap(), 1);
        assert_eq!(reader.join().unwrap(), None);
        assert!(reader_done.load(Ordering::SeqCst));
    }

    #[test]
    fn test_exclusive_panicking_compute_releases_lock() {
        let cache = ExclusiveCache::<u32>::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_set_with("k", || panic!("compute failed"))
        }));

        assert!(result.is_err());
        assert!(!cache.has("k"));
        cache.set("k", 5);
        assert_eq!(cache.get("k"), Some(5));
    }
}
