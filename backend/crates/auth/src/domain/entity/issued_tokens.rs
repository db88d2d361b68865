//! Issued Tokens
//!
//! Token pair minted by a token issuer for one successful login.

/// Token type reported to clients
pub const BEARER_TOKEN_TYPE: &str = "Bearer";

/// Tokens minted by a token issuer for one login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
}

impl IssuedTokens {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: u64) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: BEARER_TOKEN_TYPE.to_string(),
            expires_in,
        }
    }
}
