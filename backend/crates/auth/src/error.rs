//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user name or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account exists but may not log in
    #[error("Account is disabled")]
    AccountDisabled,

    /// Too many consecutive failures
    #[error("Account is temporarily locked")]
    AccountLocked,

    /// Malformed login request
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Token signature, issuer, type or expiry rejected
    #[error("Invalid token")]
    InvalidToken,

    /// Password expiry policy rejected at startup
    #[error("Password policy misconfigured: {0}")]
    PolicyMisconfiguration(String),

    /// Any other configuration rejected at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Token minting failed
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::AccountDisabled | AuthError::AccountLocked => ErrorKind::Forbidden,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::PolicyMisconfiguration(_)
            | AuthError::Configuration(_)
            | AuthError::TokenIssuance(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string());
        match self {
            AuthError::InvalidCredentials => {
                err.with_action("Check your user name and password and try again")
            }
            AuthError::AccountLocked => err.with_action("Wait a few minutes before trying again"),
            AuthError::AccountDisabled => err.with_action("Contact your store administrator"),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::PolicyMisconfiguration(msg) | AuthError::Configuration(msg) => {
                tracing::error!(message = %msg, "Auth configuration rejected");
            }
            AuthError::TokenIssuance(msg) => {
                tracing::error!(message = %msg, "Token issuance failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.log();
        err.to_app_error()
    }
}
