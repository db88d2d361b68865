//! Login Credentials
//!
//! Transient per-request input. Never persisted, never logged.

use std::fmt;

use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct LoginCredentials {
    username: UserName,
    password: RawPassword,
}

impl LoginCredentials {
    /// Check both fields are present and well formed
    ///
    /// An empty field is a [`AuthError::Validation`] error; nothing is
    /// looked up until both fields pass.
    pub fn new(username: &str, password: String) -> AuthResult<Self> {
        if username.trim().is_empty() {
            return Err(AuthError::Validation(
                "username must not be empty".to_string(),
            ));
        }

        let username = UserName::new(username)?;
        let password = RawPassword::for_login(password)?;

        Ok(Self { username, password })
    }

    pub fn username(&self) -> &UserName {
        &self.username
    }

    pub fn password(&self) -> &RawPassword {
        &self.password
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username.original())
            .field("password", &"[REDACTED]")
            .finish()
    }
}
