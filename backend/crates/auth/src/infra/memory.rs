//! In-Memory Credential Store
//!
//! Seeded from `UserRecord` JSON at startup; failure counters and lockout
//! live for the lifetime of the process.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::{authenticated_user::AuthenticatedUser, user_account::UserAccount};
use crate::domain::traits::CredentialVerifier;
use crate::domain::value_object::{
    account_status::AccountStatus, email::Email, login_credentials::LoginCredentials, role::Role,
    user_id::UserId, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Seed format for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role_code: String,
    pub role_name: String,
    /// Argon2id PHC string
    pub password_hash: String,
    #[serde(default)]
    pub password_changed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub password_never_expires: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl UserRecord {
    pub fn into_account(self) -> AuthResult<UserAccount> {
        let user = AuthenticatedUser {
            id: UserId::from_uuid(self.id),
            username: UserName::new(&self.username)?,
            display_name: self.display_name,
            email: self.email.map(Email::new).transpose()?,
            role: Role::new(&self.role_code, self.role_name)?,
            password_changed_at: self.password_changed_at,
            password_never_expires: self.password_never_expires,
        };

        let mut account = UserAccount::new(user, UserPassword::from_phc_string(self.password_hash)?);
        if self.disabled {
            account.status = AccountStatus::Disabled;
        }

        Ok(account)
    }
}

/// Credential verifier backed by a process-local map keyed by canonical user name
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, UserAccount>>,
    pepper: Option<Vec<u8>>,
}

impl InMemoryCredentialStore {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            pepper,
        }
    }

    /// Build a store from seed records; duplicate user names are rejected
    pub fn from_records(records: Vec<UserRecord>, pepper: Option<Vec<u8>>) -> AuthResult<Self> {
        let mut accounts = HashMap::with_capacity(records.len());

        for record in records {
            let account = record.into_account()?;
            let key = account.user.username.canonical().to_string();
            if accounts.contains_key(&key) {
                return Err(AuthError::Configuration(format!(
                    "duplicate user name: {}",
                    account.user.username.original()
                )));
            }
            accounts.insert(key, account);
        }

        tracing::debug!(count = accounts.len(), "Credential store seeded");

        Ok(Self {
            accounts: RwLock::new(accounts),
            pepper,
        })
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl CredentialVerifier for InMemoryCredentialStore {
    async fn verify(
        &self,
        credentials: &LoginCredentials,
        now: DateTime<Utc>,
    ) -> AuthResult<AuthenticatedUser> {
        let key = credentials.username().canonical();

        // Snapshot under the read lock; the hash check runs without any lock held
        let password_hash = {
            let accounts = self.accounts.read().await;
            let Some(account) = accounts.get(key) else {
                tracing::debug!("Login attempt for unknown user");
                return Err(AuthError::InvalidCredentials);
            };
            if account.is_locked(now) {
                return Err(AuthError::AccountLocked);
            }
            account.password_hash.clone()
        };

        let password = credentials.password().clone();
        let pepper = self.pepper.clone();
        let valid = tokio::task::spawn_blocking(move || {
            password_hash.verify(&password, pepper.as_deref())
        })
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?;

        let mut accounts = self.accounts.write().await;
        let Some(account) = accounts.get_mut(key) else {
            return Err(AuthError::InvalidCredentials);
        };

        if account.is_locked(now) {
            return Err(AuthError::AccountLocked);
        }

        if !valid {
            account.record_failure(now);
            if account.is_locked(now) {
                tracing::warn!(
                    user_id = %account.user.id,
                    failures = account.login_failed_count,
                    "Account locked after repeated login failures"
                );
            }
            return Err(AuthError::InvalidCredentials);
        }

        if !account.status.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        account.reset_failures();
        Ok(account.user.clone())
    }
}
