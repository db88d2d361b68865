//! Collaborator Traits
//!
//! The login flow talks to credential storage and token minting only
//! through these traits. Implementations live in the infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::{authenticated_user::AuthenticatedUser, issued_tokens::IssuedTokens};
use crate::domain::value_object::login_credentials::LoginCredentials;
use crate::error::AuthResult;

/// Checks a user name and password and returns the matching identity
#[trait_variant::make(CredentialVerifier: Send)]
pub trait LocalCredentialVerifier {
    /// Fails with `InvalidCredentials` for an unknown user or wrong password.
    /// `now` drives lockout bookkeeping.
    async fn verify(
        &self,
        credentials: &LoginCredentials,
        now: DateTime<Utc>,
    ) -> AuthResult<AuthenticatedUser>;
}

/// Mints access and refresh tokens for a verified identity
#[trait_variant::make(TokenIssuer: Send)]
pub trait LocalTokenIssuer {
    async fn issue(&self, user: &AuthenticatedUser, now: DateTime<Utc>)
    -> AuthResult<IssuedTokens>;
}
