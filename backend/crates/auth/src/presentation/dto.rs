//! API DTOs (Data Transfer Objects)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entity::login_result::{LoginResult, UserSummary};
use crate::domain::value_object::login_credentials::LoginCredentials;
use crate::error::AuthResult;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    /// Turn the raw request into validated credentials
    pub fn validate(self) -> AuthResult<LoginCredentials> {
        LoginCredentials::new(&self.username, self.password)
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: u64,
    pub user: UserSummaryResponse,
    pub password_expired: bool,
    /// `-1` when password expiry does not apply
    pub password_remaining_days: i64,
    pub password_change_required: bool,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: result.token_type,
            expires_in: result.expires_in,
            user: result.user.into(),
            password_expired: result.password_expired,
            password_remaining_days: result.password_remaining_days,
            password_change_required: result.password_change_required,
        }
    }
}

// ============================================================================
// User Summary
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role_code: String,
    pub role_name: String,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.original().to_string(),
            display_name: user.display_name,
            email: user.email.map(|e| e.as_str().to_string()),
            role_code: user.role.code.as_str().to_string(),
            role_name: user.role.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        email::Email, role::Role, user_id::UserId, user_name::UserName,
    };
    use crate::error::AuthError;

    fn result() -> LoginResult {
        LoginResult {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 900,
            user: UserSummary {
                id: UserId::new(),
                username: UserName::new("buyer01").unwrap(),
                display_name: "Produce Buyer".to_string(),
                email: Some(Email::new("buyer01@example.com").unwrap()),
                role: Role::new("buyer", "Buyer").unwrap(),
            },
            password_expired: false,
            password_remaining_days: 5,
            password_change_required: true,
        }
    }

    #[test]
    fn test_login_response_field_names() {
        let value = serde_json::to_value(LoginResponse::from(result())).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "accessToken",
                "expiresIn",
                "passwordChangeRequired",
                "passwordExpired",
                "passwordRemainingDays",
                "refreshToken",
                "tokenType",
                "user",
            ]
        );

        assert_eq!(value["tokenType"], "Bearer");
        assert_eq!(value["passwordRemainingDays"], 5);
        assert_eq!(value["user"]["displayName"], "Produce Buyer");
        assert_eq!(value["user"]["email"], "buyer01@example.com");
        assert_eq!(value["user"]["roleCode"], "buyer");
        assert_eq!(value["user"]["roleName"], "Buyer");
    }

    #[test]
    fn test_missing_email_serializes_as_null() {
        let mut result = result();
        result.user.email = None;
        let value = serde_json::to_value(LoginResponse::from(result)).unwrap();
        assert!(value["user"]["email"].is_null());
    }

    #[test]
    fn test_login_request_validate() {
        let request: LoginRequest =
            serde_json::from_str(r#"{"username":"buyer01","password":"Purchase#Ord1"}"#).unwrap();
        let credentials = request.validate().unwrap();
        assert_eq!(credentials.username().original(), "buyer01");
    }

    #[test]
    fn test_login_request_empty_fields() {
        let request: LoginRequest = serde_json::from_str(r#"{"password":"x"}"#).unwrap();
        assert!(matches!(request.validate(), Err(AuthError::Validation(_))));

        let request: LoginRequest = serde_json::from_str(r#"{"username":"buyer01"}"#).unwrap();
        assert!(matches!(request.validate(), Err(AuthError::Validation(_))));
    }

    #[test]
    fn test_login_request_debug_redacts_password() {
        let request = LoginRequest {
            username: "buyer01".to_string(),
            password: "Purchase#Ord1".to_string(),
        };
        let debug = format!("{:?}", request);
        assert!(!debug.contains("Purchase#Ord1"));
    }
}
