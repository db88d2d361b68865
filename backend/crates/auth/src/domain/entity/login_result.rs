//! Login Result
//!
//! Built once per successful login by the login result assembler and
//! handed back to the caller. Never stored.

use crate::domain::entity::authenticated_user::AuthenticatedUser;
use crate::domain::value_object::{email::Email, role::Role, user_id::UserId, user_name::UserName};

/// Profile fields safe to return to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub username: UserName,
    pub display_name: String,
    pub email: Option<Email>,
    pub role: Role,
}

impl From<&AuthenticatedUser> for UserSummary {
    fn from(user: &AuthenticatedUser) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserSummary,
    pub password_expired: bool,
    /// `-1` when password expiry does not apply to this account
    pub password_remaining_days: i64,
    pub password_change_required: bool,
}
