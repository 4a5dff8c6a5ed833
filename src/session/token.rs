//! Session Tokens
//!
//! HS256 JWT issuing and validation for caller identity.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{RequestContext, SessionError};
use crate::config::Config;

// == Claims ==
/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Caller id
    pub id: u32,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Not before (Unix seconds)
    pub nbf: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

// == Token Service ==
/// Issues and validates session tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    has_secret: bool,
    issuer: String,
    ttl_secs: u64,
}

impl TokenService {
    // == Constructor ==
    /// Creates a token service.
    ///
    /// # Arguments
    /// * `secret` - HMAC secret; an empty secret makes every issue/validate fail
    /// * `issuer` - Value used for both the `iss` and `aud` claims
    /// * `ttl_secs` - Lifetime of issued tokens
    pub fn new(secret: &str, issuer: impl Into<String>, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            has_secret: !secret.is_empty(),
            issuer: issuer.into(),
            ttl_secs,
        }
    }

    /// Creates a token service from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.secret_key, config.api_endpoint.clone(), config.token_ttl)
    }

    // == Issue ==
    /// Signs a token identifying `user_id`.
    ///
    /// Fails with [`SessionError::Encoding`] when the lifetime pushes `exp`
    /// past the range of a Unix timestamp.
    pub fn issue(&self, user_id: u32) -> Result<String, SessionError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl_secs)
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or_else(|| {
                SessionError::Encoding(format!("token ttl {}s is out of range", self.ttl_secs))
            })?;
        let claims = Claims {
            id: user_id,
            iss: self.issuer.clone(),
            aud: self.issuer.clone(),
            iat: now,
            nbf: now,
            exp,
        };

        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, SessionError> {
        if !self.has_secret {
            return Err(SessionError::MissingSecret);
        }

        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| SessionError::Encoding(e.to_string()))
    }

    // == Validate ==
    /// Verifies signature, issuer, audience, expiry and not-before.
    pub fn validate(&self, token: &str) -> Result<Claims, SessionError> {
        if !self.has_secret {
            return Err(SessionError::MissingSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.issuer]);
        validation.validate_nbf = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| SessionError::InvalidToken(e.to_string()))
    }

    /// Validates the token in an `Authorization` header value.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Claims, SessionError> {
        let token = authorization
            .and_then(token_from_header)
            .ok_or(SessionError::MissingToken)?;
        self.validate(token)
    }

    // == Resolve ==
    /// Builds the request context for an `Authorization` header value.
    ///
    /// Missing or invalid tokens yield an anonymous context.
    pub fn resolve(&self, authorization: Option<&str>) -> RequestContext {
        match self.authenticate(authorization) {
            Ok(claims) => RequestContext::authenticated(claims.id),
            Err(SessionError::MissingToken) => RequestContext::anonymous(),
            Err(err) => {
                debug!(error = %err, "rejected session token");
                RequestContext::anonymous()
            }
        }
    }
}

// == Header Parsing ==
/// Extracts the token from a `Bearer <token>` header value.
///
/// The value must split on a single space into exactly two parts.
pub fn token_from_header(value: &str) -> Option<&str> {
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Some(token)
        }
        _ => None,
    }
}
