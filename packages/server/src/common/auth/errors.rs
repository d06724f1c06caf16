use thiserror::Error;

use super::{Capability, Resource};

/// Authentication and authorization failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("This action is unauthorized ({capability} {resource})")]
    PermissionDenied {
        capability: Capability,
        resource: Resource,
    },

    #[error("Invalid or expired token")]
    InvalidToken,
}

impl AuthError {
    /// True when the caller is not logged in at all (HTTP 401 rather than 403).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::AuthenticationRequired | AuthError::InvalidToken
        )
    }
}
