//! JWT Token Issuer
//!
//! Access and refresh tokens are both HS256 JWTs, told apart by the `typ`
//! claim so a refresh token is never accepted where an access token is
//! expected.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use platform::crypto::random_token;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::{authenticated_user::AuthenticatedUser, issued_tokens::IssuedTokens};
use crate::domain::traits::TokenIssuer;
use crate::error::{AuthError, AuthResult};

/// Random bytes in the `jti` claim
const TOKEN_ID_BYTES: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID
    pub sub: String,
    pub username: String,
    /// Role code
    pub role: String,
    pub typ: TokenKind,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            issuer: config.token_issuer.clone(),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
        }
    }

    fn sign(
        &self,
        user: &AuthenticatedUser,
        kind: TokenKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AuthResult<String> {
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|secs| now.timestamp().checked_add(secs))
            .ok_or_else(|| {
                AuthError::TokenIssuance(format!("token lifetime out of range: {:?}", ttl))
            })?;

        let claims = TokenClaims {
            sub: user.id.to_string(),
            username: user.username.original().to_string(),
            role: user.role.code.as_str().to_string(),
            typ: kind,
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp,
            jti: random_token(TOKEN_ID_BYTES),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenIssuance(format!("jwt encode: {e}")))
    }

    /// Verify signature, issuer, expiry and token kind
    pub fn decode(&self, token: &str, expected: TokenKind) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?
            .claims;

        if claims.typ != expected {
            tracing::debug!(expected = ?expected, actual = ?claims.typ, "Token kind mismatch");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    async fn issue(
        &self,
        user: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedTokens> {
        let access_token = self.sign(user, TokenKind::Access, now, self.access_ttl)?;
        let refresh_token = self.sign(user, TokenKind::Refresh, now, self.refresh_ttl)?;

        Ok(IssuedTokens::bearer(
            access_token,
            refresh_token,
            self.access_ttl.as_secs(),
        ))
    }
}
