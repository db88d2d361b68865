//! User Password Value Objects
//!
//! Domain wrappers around `platform::password`.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as typed by the user. Zeroized when dropped.
#[derive(Clone)]
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Accept a password typed at login (non-empty, bounded length)
    pub fn for_login(raw: String) -> AuthResult<Self> {
        ClearTextPassword::for_login(raw)
            .map(Self)
            .map_err(policy_error)
    }

    /// Validate a newly chosen password against the composition rules
    pub fn new(raw: String) -> AuthResult<Self> {
        ClearTextPassword::new(raw).map(Self).map_err(policy_error)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(err: PasswordPolicyError) -> AuthError {
    match err {
        PasswordPolicyError::EmptyOrWhitespace => {
            AuthError::Validation("password must not be empty".to_string())
        }
        other => AuthError::Validation(other.to_string()),
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored Argon2id password hash
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| AuthError::Internal(e.to_string()))
    }

    /// Load a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|e| match e {
                PasswordHashError::InvalidHashFormat => {
                    AuthError::Configuration("invalid stored password hash".to_string())
                }
                other => AuthError::Internal(other.to_string()),
            })
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification; the pepper must match the one used to hash
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
