//! Sync Cache - thread-safe in-memory get-or-compute caches
//!
//! Provides an exclusive-lock and a read/write-lock cache with the same
//! operation set, plus a small HTTP server and session layer built on them.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod session;

pub use api::AppState;
pub use cache::{ExclusiveCache, KeyValueCache, SharedCache};
pub use config::{CacheKind, Config};
pub use session::{RequestContext, TokenService};
