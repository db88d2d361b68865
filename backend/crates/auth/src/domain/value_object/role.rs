//! Role Value Objects
//!
//! ERP roles are data (cashier, buyer, store manager, head office, ...),
//! so a role is a validated code plus a display name rather than an enum.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Maximum role code length
const ROLE_CODE_MAX_LENGTH: usize = 32;

/// Machine-readable role code: lowercase ASCII, digits and `_`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleCode(String);

impl RoleCode {
    pub fn new(code: &str) -> AuthResult<Self> {
        let code = code.trim();

        let valid = !code.is_empty()
            && code.len() <= ROLE_CODE_MAX_LENGTH
            && code
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

        if !valid {
            return Err(AuthError::Validation(format!("invalid role code: {:?}", code)));
        }

        Ok(Self(code.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoleCode {
    type Error = AuthError;

    fn try_from(value: String) -> AuthResult<Self> {
        Self::new(&value)
    }
}

impl From<RoleCode> for String {
    fn from(value: RoleCode) -> Self {
        value.0
    }
}

/// Role assigned to a user
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{code}")]
pub struct Role {
    pub code: RoleCode,
    /// Human-readable name shown in the back office
    pub name: String,
}

impl Role {
    pub fn new(code: &str, name: impl Into<String>) -> AuthResult<Self> {
        Ok(Self {
            code: RoleCode::new(code)?,
            name: name.into(),
        })
    }
}
