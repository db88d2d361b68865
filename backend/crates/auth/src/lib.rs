//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, password expiry policy, collaborator traits
//! - `application/` - Configuration, login result assembler, login use case
//! - `infra/` - In-memory credential store, JWT token issuer
//! - `presentation/` - Login DTOs
//!
//! ## Features
//! - Login with user name + password
//! - Access/refresh token pair on success
//! - Password expiry status (remaining days, expired, change required) on every login
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Unknown user and wrong password are indistinguishable to the caller
//! - Automatic lockout after failed login attempts

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, LoginResultAssembler, LoginUseCase};
pub use domain::{CredentialVerifier, PasswordExpiryPolicy, PasswordStatus, TokenIssuer};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryCredentialStore, JwtTokenIssuer};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::{InMemoryCredentialStore as CredentialStore, UserRecord};
}

#[cfg(test)]
mod tests;
