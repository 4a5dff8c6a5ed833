//! Request Context
//!
//! Per-request identity resolved from the session token.

use super::SessionError;

/// Identity of the caller for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    caller_id: Option<u32>,
}

impl RequestContext {
    /// Context for a request without a valid session token.
    pub fn anonymous() -> Self {
        Self { caller_id: None }
    }

    /// Context for a request authenticated as `caller_id`.
    pub fn authenticated(caller_id: u32) -> Self {
        Self {
            caller_id: Some(caller_id),
        }
    }

    pub fn caller_id(&self) -> Option<u32> {
        self.caller_id
    }

    pub fn is_authenticated(&self) -> bool {
        self.caller_id.is_some()
    }

    /// Returns the caller id or [`SessionError::MissingToken`].
    pub fn require_caller(&self) -> Result<u32, SessionError> {
        self.caller_id.ok_or(SessionError::MissingToken)
    }

    /// True when the authenticated caller is `user_id`.
    pub fn is_owner(&self, user_id: u32) -> bool {
        self.caller_id == Some(user_id)
    }

    /// Picks the listing action a controller should serve to this caller.
    ///
    /// The `authentication` controller always gets `index`.
    pub fn action_for(&self, controller: &str) -> &'static str {
        if self.is_authenticated() || controller == "authentication" {
            "index"
        } else {
            "public-index"
        }
    }
}
