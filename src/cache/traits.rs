//! Cache Contract
//!
//! The operation set shared by [`ExclusiveCache`](super::ExclusiveCache) and
//! [`SharedCache`](super::SharedCache).

/// Thread-safe string-keyed cache with get-or-compute semantics.
///
/// Every call is atomic with respect to the instance lock. Lookups report
/// absence through `Option` or a caller-supplied fallback; no operation fails.
///
/// Closures passed to [`range`](Self::range) and the `get_or_set_with`
/// family run while the lock is held. They must not call back into the same
/// cache (the locks are not re-entrant) and every other caller waits for them.
pub trait KeyValueCache<V: Clone>: Send + Sync {
    /// Returns a clone of the value stored under `key`.
    fn get(&self, key: &str) -> Option<V>;

    /// Returns true if `key` is present.
    fn has(&self, key: &str) -> bool;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: impl Into<String>, value: V);

    /// Removes `key`. Absent keys are ignored.
    fn delete(&self, key: &str);

    /// Atomically replaces the backing map with an empty one.
    fn flush(&self);

    /// Synonym for [`flush`](Self::flush).
    fn clear(&self) {
        self.flush();
    }

    /// Unordered snapshot of the current keys.
    fn keys(&self) -> Vec<String>;

    /// Unordered snapshot of the current values. Taken under its own lock
    /// acquisition, so it need not line up with an earlier `keys()` call.
    fn values(&self) -> Vec<V>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Calls `visit` for each entry until it returns false.
    fn range<F>(&self, visit: F)
    where
        F: FnMut(&str, &V) -> bool;

    /// Stores `value` only if `key` is absent.
    fn set_default(&self, key: impl Into<String>, value: V);

    /// Returns the stored value, or `fallback` (which is never stored).
    fn get_default(&self, key: &str, fallback: V) -> V;

    /// Returns the stored value, storing `value` first if `key` is absent.
    fn get_or_set(&self, key: &str, value: V) -> V;

    /// Same as [`get_or_set`](Self::get_or_set). `fallback` is accepted for
    /// call-site compatibility and never consulted.
    fn get_or_set_default(&self, key: &str, value: V, _fallback: V) -> V {
        self.get_or_set(key, value)
    }

    /// Returns the stored value, or runs `compute` under the exclusive lock,
    /// stores its result and returns it. `compute` runs once per miss and
    /// concurrent callers for the same key all observe that one result.
    fn get_or_set_with<F>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> V;

    /// Same as [`get_or_set_with`](Self::get_or_set_with); `compute` still
    /// runs exactly once per miss and `fallback` is never consulted.
    fn get_or_set_with_default<F>(&self, key: &str, compute: F, _fallback: V) -> V
    where
        F: FnOnce() -> V,
    {
        self.get_or_set_with(key, compute)
    }
}
