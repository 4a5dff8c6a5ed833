//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

// == Cache Kind ==
/// Which lock variant backs the server's cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheKind {
    /// Single mutex around every operation
    Exclusive,
    /// Read/write lock, concurrent readers
    #[default]
    Shared,
}

impl FromStr for CacheKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" | "mutex" => Ok(CacheKind::Exclusive),
            "shared" | "rwlock" => Ok(CacheKind::Shared),
            other => Err(format!("unknown cache kind '{}'", other)),
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKind::Exclusive => write!(f, "exclusive"),
            CacheKind::Shared => write!(f, "shared"),
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lock variant used for the cache
    pub cache_kind: CacheKind,
    /// HMAC secret for session tokens; empty disables token handling
    pub secret_key: String,
    /// Lifetime of issued session tokens in seconds
    pub token_ttl: u64,
    /// Issuer and audience stamped into session tokens
    pub api_endpoint: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_KIND` - `shared` or `exclusive` (default: shared)
    /// - `SECRET_KEY` - Token signing secret (default: empty)
    /// - `TOKEN_TTL` - Token lifetime in seconds (default: 3600)
    /// - `API_ENDPOINT` - Token issuer/audience (default: http://localhost:3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            cache_kind: env::var("CACHE_KIND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_kind),
            secret_key: env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            token_ttl: env::var("TOKEN_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.token_ttl),
            api_endpoint: env::var("API_ENDPOINT").unwrap_or(defaults.api_endpoint),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_kind: CacheKind::Shared,
            secret_key: String::new(),
            token_ttl: 3600,
            api_endpoint: "http://localhost:3000".to_string(),
        }
    }
}
