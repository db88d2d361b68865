//! Cross-layer login scenarios: request DTO through the in-memory store and
//! JWT issuer to the serialized response.

#[cfg(test)]
mod login_flow_tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};
    use uuid::Uuid;

    use crate::application::{AuthConfig, LoginResultAssembler, LoginUseCase};
    use crate::domain::entity::user_account::UserAccount;
    use crate::domain::password_expiry::PasswordExpiryPolicy;
    use crate::domain::value_object::user_password::{RawPassword, UserPassword};
    use crate::error::AuthError;
    use crate::infra::{InMemoryCredentialStore, JwtTokenIssuer, TokenKind, UserRecord};
    use crate::presentation::dto::{LoginRequest, LoginResponse};

    const PEPPER: &[u8] = b"store-network-pepper";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 8, 0, 0).unwrap()
    }

    fn record(username: &str, password: &str, changed_days_ago: Option<i64>) -> UserRecord {
        let raw = RawPassword::new(password.to_string()).unwrap();
        UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            display_name: format!("{} (store 042)", username),
            email: Some(format!("{}@example.com", username)),
            role_code: "store_manager".to_string(),
            role_name: "Store Manager".to_string(),
            password_hash: UserPassword::from_raw(&raw, Some(PEPPER))
                .unwrap()
                .as_phc_string()
                .to_string(),
            password_changed_at: changed_days_ago.map(|days| now() - Duration::days(days)),
            password_never_expires: false,
            disabled: false,
        }
    }

    struct Harness {
        use_case: LoginUseCase<InMemoryCredentialStore, JwtTokenIssuer>,
        issuer: Arc<JwtTokenIssuer>,
    }

    fn harness(records: Vec<UserRecord>, policy: PasswordExpiryPolicy) -> Harness {
        let config = AuthConfig {
            password_pepper: Some(PEPPER.to_vec()),
            password_policy: policy,
            ..AuthConfig::development()
        };
        config.validate().unwrap();

        let store = Arc::new(
            InMemoryCredentialStore::from_records(records, config.password_pepper.clone()).unwrap(),
        );
        let issuer = Arc::new(JwtTokenIssuer::new(&config));
        let use_case = LoginUseCase::new(
            store,
            Arc::clone(&issuer),
            LoginResultAssembler::new(config.password_policy),
        );

        Harness { use_case, issuer }
    }

    fn request(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn policy() -> PasswordExpiryPolicy {
        PasswordExpiryPolicy::new(90, 7).unwrap()
    }

    #[tokio::test]
    async fn test_login_in_warning_window() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(85))], policy());

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();

        assert_eq!(result.password_remaining_days, 5);
        assert!(!result.password_expired);
        assert!(result.password_change_required);
        assert_eq!(result.token_type, "Bearer");
        assert_eq!(result.expires_in, 900);
    }

    #[tokio::test]
    async fn test_login_past_max_age() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(95))], policy());

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();

        assert_eq!(result.password_remaining_days, 0);
        assert!(result.password_expired);
        assert!(result.password_change_required);
    }

    #[tokio::test]
    async fn test_login_never_changed_password() {
        let h = harness(vec![record("newhire", "First#Day2026", None)], policy());

        let credentials = request("newhire", "First#Day2026").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();

        assert_eq!(result.password_remaining_days, 0);
        assert!(result.password_expired);
    }

    #[tokio::test]
    async fn test_exempt_account() {
        let mut kiosk = record("kiosk01", "SelfCheckout#1", Some(400));
        kiosk.password_never_expires = true;
        let h = harness(vec![kiosk], policy());

        let credentials = request("kiosk01", "SelfCheckout#1").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();

        assert_eq!(result.password_remaining_days, -1);
        assert!(!result.password_expired);
        assert!(!result.password_change_required);
    }

    #[tokio::test]
    async fn test_policy_disabled() {
        let h = harness(
            vec![record("mgr042", "Store#042Open", Some(400))],
            PasswordExpiryPolicy::disabled(),
        );

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();

        assert_eq!(result.password_remaining_days, -1);
        assert!(!result.password_change_required);
    }

    #[tokio::test]
    async fn test_issued_tokens_decode() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(10))], policy());

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        let result = h.use_case.execute(credentials).await.unwrap();

        let access = h.issuer.decode(&result.access_token, TokenKind::Access).unwrap();
        assert_eq!(access.sub, result.user.id.to_string());
        assert_eq!(access.role, "store_manager");

        let refresh = h.issuer.decode(&result.refresh_token, TokenKind::Refresh).unwrap();
        assert_eq!(refresh.sub, access.sub);
    }

    #[tokio::test]
    async fn test_wrong_password_then_lockout() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(10))], policy());

        for _ in 0..UserAccount::MAX_LOGIN_FAILURES {
            let credentials = request("mgr042", "Wrong#Password1").validate().unwrap();
            assert!(matches!(
                h.use_case.execute_at(credentials, now()).await,
                Err(AuthError::InvalidCredentials)
            ));
        }

        // Correct password is refused while locked
        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        assert!(matches!(
            h.use_case.execute_at(credentials, now()).await,
            Err(AuthError::AccountLocked)
        ));

        // And accepted once the lockout has passed
        let later = now() + Duration::minutes(UserAccount::LOCKOUT_MINUTES);
        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        assert!(h.use_case.execute_at(credentials, later).await.is_ok());
    }

    #[tokio::test]
    async fn test_success_resets_failure_count() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(10))], policy());

        for _ in 0..UserAccount::MAX_LOGIN_FAILURES - 1 {
            let credentials = request("mgr042", "Wrong#Password1").validate().unwrap();
            let _ = h.use_case.execute_at(credentials, now()).await;
        }
        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        h.use_case.execute_at(credentials, now()).await.unwrap();

        let credentials = request("mgr042", "Wrong#Password1").validate().unwrap();
        assert!(matches!(
            h.use_case.execute_at(credentials, now()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_disabled_account() {
        let mut leaver = record("leaver", "Last#Shift2025", Some(10));
        leaver.disabled = true;
        let h = harness(vec![leaver], policy());

        let credentials = request("leaver", "Last#Shift2025").validate().unwrap();
        let err = h.use_case.execute_at(credentials, now()).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled));
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_pepper_mismatch_rejected() {
        let records = vec![record("mgr042", "Store#042Open", Some(10))];
        let store = InMemoryCredentialStore::from_records(records, None).unwrap();
        let config = AuthConfig::development();
        let use_case = LoginUseCase::new(
            Arc::new(store),
            Arc::new(JwtTokenIssuer::new(&config)),
            LoginResultAssembler::new(policy()),
        );

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        assert!(matches!(
            use_case.execute_at(credentials, now()).await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_response_json() {
        let h = harness(vec![record("mgr042", "Store#042Open", Some(85))], policy());

        let credentials = request("mgr042", "Store#042Open").validate().unwrap();
        let result = h.use_case.execute_at(credentials, now()).await.unwrap();
        let json = serde_json::to_value(LoginResponse::from(result)).unwrap();

        assert_eq!(json["passwordRemainingDays"], 5);
        assert_eq!(json["passwordExpired"], false);
        assert_eq!(json["passwordChangeRequired"], true);
        assert_eq!(json["user"]["username"], "mgr042");
        assert_eq!(json["user"]["roleName"], "Store Manager");
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::AuthError;
    use kernel::error::app_error::AppError;

    #[test]
    fn test_login_failure_problem_details() {
        let app: AppError = AuthError::InvalidCredentials.into();
        let body = app.problem_details();
        assert_eq!(body["status"], 401);
    }

    #[test]
    fn test_server_fault_hides_detail() {
        let app: AppError = AuthError::TokenIssuance("signing key rejected".to_string()).into();
        let body = app.problem_details().to_string();
        assert!(!body.contains("signing key rejected"));
    }
}
