use thiserror::Error;

use crate::common::Role;

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Role '{role}' is not permitted to {action}")]
    PermissionDenied { role: Role, action: &'static str },
}
