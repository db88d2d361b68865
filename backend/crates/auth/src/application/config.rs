//! Application Configuration
//!
//! Configuration for the Auth application layer. Everything here is
//! validated once at startup; request handling never re-checks it.

use std::time::Duration;

use platform::crypto::{from_base64, random_bytes};

use crate::domain::password_expiry::PasswordExpiryPolicy;
use crate::error::{AuthError, AuthResult};

/// Minimum token signing secret length in bytes (HS256)
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime (one year)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing tokens
    pub token_secret: Vec<u8>,
    /// `iss` claim written into and required from every token
    pub token_issuer: String,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Password expiry rules; disabled unless configured
    pub password_policy: PasswordExpiryPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; MIN_TOKEN_SECRET_LEN],
            token_issuer: "retail-erp".to_string(),
            access_token_ttl: Duration::from_secs(15 * 60),
            refresh_token_ttl: Duration::from_secs(7 * 24 * 3600),
            password_pepper: None,
            password_policy: PasswordExpiryPolicy::disabled(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_issuer", &self.token_issuer)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .field("password_policy", &self.password_policy)
            .finish()
    }
}

impl AuthConfig {
    /// Create config with a random token secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_bytes(MIN_TOKEN_SECRET_LEN),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self {
            token_issuer: "retail-erp-dev".to_string(),
            ..Self::with_random_secret()
        }
    }

    /// Build from key/value settings (normally the process environment)
    ///
    /// Recognized keys: `TOKEN_SECRET` (base64), `TOKEN_ISSUER`,
    /// `ACCESS_TOKEN_TTL_SECS`, `REFRESH_TOKEN_TTL_SECS`, `PASSWORD_PEPPER`,
    /// `PASSWORD_MAX_AGE_DAYS`, `PASSWORD_WARNING_DAYS`.
    ///
    /// A missing `TOKEN_SECRET` is only tolerated when
    /// `allow_random_secret` is set. The result is validated before return.
    pub fn from_lookup<F>(lookup: F, allow_random_secret: bool) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let token_secret = match lookup("TOKEN_SECRET") {
            Some(encoded) => from_base64(&encoded).map_err(|e| {
                AuthError::Configuration(format!("TOKEN_SECRET is not valid base64: {}", e))
            })?,
            None if allow_random_secret => {
                tracing::warn!("TOKEN_SECRET not set, using a random secret for this process");
                random_bytes(MIN_TOKEN_SECRET_LEN)
            }
            None => {
                return Err(AuthError::Configuration(
                    "TOKEN_SECRET must be set".to_string(),
                ));
            }
        };

        let access_token_ttl = parse_number(&lookup, "ACCESS_TOKEN_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.access_token_ttl);
        let refresh_token_ttl = parse_number(&lookup, "REFRESH_TOKEN_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.refresh_token_ttl);

        let password_policy = PasswordExpiryPolicy::from_settings(
            parse_policy_days(&lookup, "PASSWORD_MAX_AGE_DAYS")?,
            parse_policy_days(&lookup, "PASSWORD_WARNING_DAYS")?,
        )?;

        let config = Self {
            token_secret,
            token_issuer: lookup("TOKEN_ISSUER").unwrap_or(defaults.token_issuer),
            access_token_ttl,
            refresh_token_ttl,
            password_pepper: lookup("PASSWORD_PEPPER")
                .filter(|p| !p.is_empty())
                .map(String::into_bytes),
            password_policy,
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail-fast startup check
    pub fn validate(&self) -> AuthResult<()> {
        if self.token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(AuthError::Configuration(format!(
                "token secret must be at least {} bytes (got {})",
                MIN_TOKEN_SECRET_LEN,
                self.token_secret.len()
            )));
        }
        if self.token_secret.iter().all(|&b| b == 0) {
            return Err(AuthError::Configuration(
                "token secret must not be all zeros".to_string(),
            ));
        }
        if self.token_issuer.trim().is_empty() {
            return Err(AuthError::Configuration(
                "token issuer must not be empty".to_string(),
            ));
        }
        if self.access_token_ttl.is_zero() {
            return Err(AuthError::Configuration(
                "access token TTL must be positive".to_string(),
            ));
        }
        if self.access_token_ttl > MAX_TOKEN_TTL || self.refresh_token_ttl > MAX_TOKEN_TTL {
            return Err(AuthError::Configuration(format!(
                "token TTLs must not exceed {} seconds",
                MAX_TOKEN_TTL.as_secs()
            )));
        }
        if self.refresh_token_ttl <= self.access_token_ttl {
            return Err(AuthError::Configuration(
                "refresh token TTL must be longer than access token TTL".to_string(),
            ));
        }
        Ok(())
    }

    /// Access token lifetime in seconds (the `expiresIn` value)
    pub fn access_token_ttl_secs(&self) -> u64 {
        self.access_token_ttl.as_secs()
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

fn parse_number<F>(lookup: &F, key: &str) -> AuthResult<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<u64>().map_err(|e| {
                AuthError::Configuration(format!("{} must be a whole number: {}", key, e))
            })
        })
        .transpose()
}

/// Signed on purpose: a negative value must reach the policy check and be
/// reported as a misconfiguration, not as a parse error.
fn parse_policy_days<F>(lookup: &F, key: &str) -> AuthResult<Option<i64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<i64>().map_err(|e| {
                AuthError::PolicyMisconfiguration(format!("{} must be an integer: {}", key, e))
            })
        })
        .transpose()
}
