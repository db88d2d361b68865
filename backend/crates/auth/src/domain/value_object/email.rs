//! Email Value Object
//!
//! Contact address on a user profile. Format check only.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> AuthResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "email must be 1 to {} characters",
                EMAIL_MAX_LENGTH
            )));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(AuthError::Validation("email must contain '@'".to_string()));
        };

        let domain_ok = domain.contains('.')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-'])
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

        if local.is_empty() || local.len() > 64 || !domain_ok {
            return Err(AuthError::Validation(format!(
                "invalid email address: {}",
                email
            )));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
