//! Session Module
//!
//! Resolves the authenticated caller from a signed bearer token into a
//! request-scoped [`RequestContext`]. The caller id travels with the request
//! and is never parked in a shared cache under a fixed key.

mod context;
mod token;

use thiserror::Error;

pub use context::RequestContext;
pub use token::{token_from_header, Claims, TokenService};

// == Session Error Enum ==
/// Errors raised while issuing or validating session tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// No bearer token was supplied
    #[error("authentication required")]
    MissingToken,

    /// Token failed signature, issuer, audience or expiry checks
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// No signing secret is configured
    #[error("session secret is not configured")]
    MissingSecret,

    /// Token could not be signed
    #[error("failed to sign token: {0}")]
    Encoding(String),
}
