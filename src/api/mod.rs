//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a value
//! - `PUT /setdefault` - Store a value if the key is absent
//! - `POST /getorset` - Return the stored value, storing the given one on a miss
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `GET /keys` - List keys
//! - `POST /flush` - Remove every entry
//! - `GET /whoami` - Caller id from the session token
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::{build_router, create_router};
