//! Cache Module
//!
//! Thread-safe in-memory caches with get-or-compute semantics.
//!
//! Two variants share the [`KeyValueCache`] operation set:
//! - [`ExclusiveCache`] serializes every call behind one mutex.
//! - [`SharedCache`] lets readers run concurrently behind a read/write lock.

mod exclusive;
mod shared;
mod store;
mod traits;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use exclusive::ExclusiveCache;
pub use shared::SharedCache;
pub(crate) use store::CacheStore;
pub use traits::KeyValueCache;
