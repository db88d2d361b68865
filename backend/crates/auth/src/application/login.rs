//! Login Use Case
//!
//! Verifies credentials, issues tokens, and assembles the login result.
//! Any failure along the way is returned as-is; no partial result is built.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::assembler::LoginResultAssembler;
use crate::domain::entity::login_result::LoginResult;
use crate::domain::traits::{CredentialVerifier, TokenIssuer};
use crate::domain::value_object::login_credentials::LoginCredentials;
use crate::error::AuthResult;

/// Login use case
pub struct LoginUseCase<V, T>
where
    V: CredentialVerifier,
    T: TokenIssuer,
{
    verifier: Arc<V>,
    issuer: Arc<T>,
    assembler: LoginResultAssembler,
}

impl<V, T> LoginUseCase<V, T>
where
    V: CredentialVerifier,
    T: TokenIssuer,
{
    pub fn new(verifier: Arc<V>, issuer: Arc<T>, assembler: LoginResultAssembler) -> Self {
        Self {
            verifier,
            issuer,
            assembler,
        }
    }

    pub async fn execute(&self, credentials: LoginCredentials) -> AuthResult<LoginResult> {
        self.execute_at(credentials, Utc::now()).await
    }

    /// Run the login as of `now`
    pub async fn execute_at(
        &self,
        credentials: LoginCredentials,
        now: DateTime<Utc>,
    ) -> AuthResult<LoginResult> {
        let user = self.verifier.verify(&credentials, now).await?;
        drop(credentials);

        let tokens = self.issuer.issue(&user, now).await?;
        let result = self.assembler.assemble(&user, tokens, now.date_naive());

        tracing::info!(
            user_id = %user.id,
            role = %user.role,
            password_remaining_days = result.password_remaining_days,
            password_change_required = result.password_change_required,
            "User logged in"
        );

        if result.password_expired {
            tracing::warn!(user_id = %user.id, "Password expired, change required before use");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{authenticated_user::AuthenticatedUser, issued_tokens::IssuedTokens};
    use crate::domain::password_expiry::PasswordExpiryPolicy;
    use crate::domain::value_object::{role::Role, user_id::UserId, user_name::UserName};
    use crate::error::AuthError;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedVerifier {
        user: Option<AuthenticatedUser>,
    }

    impl CredentialVerifier for FixedVerifier {
        async fn verify(
            &self,
            credentials: &LoginCredentials,
            _now: DateTime<Utc>,
        ) -> AuthResult<AuthenticatedUser> {
            match &self.user {
                Some(user) if user.username.canonical() == credentials.username().canonical() => {
                    Ok(user.clone())
                }
                _ => Err(AuthError::InvalidCredentials),
            }
        }
    }

    #[derive(Default)]
    struct CountingIssuer {
        calls: AtomicUsize,
    }

    impl TokenIssuer for CountingIssuer {
        async fn issue(
            &self,
            user: &AuthenticatedUser,
            _now: DateTime<Utc>,
        ) -> AuthResult<IssuedTokens> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(IssuedTokens::bearer(
                format!("access-{}-{}", user.username.canonical(), n),
                format!("refresh-{}", n),
                900,
            ))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
    }

    fn buyer(changed_days_ago: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(),
            username: UserName::new("buyer.li").unwrap(),
            display_name: "Li Na".to_string(),
            email: None,
            role: Role::new("buyer", "Buyer").unwrap(),
            password_changed_at: Some(now() - Duration::days(changed_days_ago)),
            password_never_expires: false,
        }
    }

    fn use_case(
        user: Option<AuthenticatedUser>,
    ) -> (LoginUseCase<FixedVerifier, CountingIssuer>, Arc<CountingIssuer>) {
        let issuer = Arc::new(CountingIssuer::default());
        let use_case = LoginUseCase::new(
            Arc::new(FixedVerifier { user }),
            Arc::clone(&issuer),
            LoginResultAssembler::new(PasswordExpiryPolicy::new(90, 7).unwrap()),
        );
        (use_case, issuer)
    }

    fn credentials(username: &str) -> LoginCredentials {
        LoginCredentials::new(username, "any-password".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_successful_login() {
        let (use_case, issuer) = use_case(Some(buyer(85)));

        let result = use_case
            .execute_at(credentials("Buyer.Li"), now())
            .await
            .unwrap();

        assert_eq!(result.access_token, "access-buyer.li-0");
        assert_eq!(result.refresh_token, "refresh-0");
        assert_eq!(result.token_type, "Bearer");
        assert_eq!(result.expires_in, 900);
        assert_eq!(result.password_remaining_days, 5);
        assert!(!result.password_expired);
        assert!(result.password_change_required);
        assert_eq!(issuer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_verification_issues_nothing() {
        let (use_case, issuer) = use_case(Some(buyer(10)));

        let err = use_case
            .execute_at(credentials("someone-else"), now())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(issuer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_repeat_login_same_fields_except_tokens() {
        let (use_case, _) = use_case(Some(buyer(95)));

        let first = use_case.execute_at(credentials("buyer.li"), now()).await.unwrap();
        let second = use_case.execute_at(credentials("buyer.li"), now()).await.unwrap();

        assert_ne!(first.access_token, second.access_token);
        assert_eq!(first.user, second.user);
        assert_eq!(first.password_remaining_days, 0);
        assert_eq!(first.password_remaining_days, second.password_remaining_days);
        assert_eq!(first.password_expired, second.password_expired);
        assert_eq!(first.password_change_required, second.password_change_required);
    }
}
