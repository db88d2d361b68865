//! User Name Value Object
//!
//! Back-office login name (employee code, `zhang.wei`, `store042-mgr`, ...).
//!
//! - NFKC normalized, surrounding whitespace trimmed
//! - Canonical form is lowercase; lookups use the canonical form
//! - 1 to 64 characters, no whitespace or control characters inside

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    pub fn new(raw: &str) -> AuthResult<Self> {
        let normalized: String = raw.nfkc().collect();
        let original = normalized.trim().to_string();

        if original.is_empty() {
            return Err(AuthError::Validation(
                "user name must not be empty".to_string(),
            ));
        }

        let char_count = original.chars().count();
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "user name must be at most {} characters (got {})",
                USER_NAME_MAX_LENGTH, char_count
            )));
        }

        if original
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(AuthError::Validation(
                "user name must not contain whitespace or control characters".to_string(),
            ));
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// As entered (after normalization)
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for lookups
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for UserName {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        Self::new(&value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.original
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}
