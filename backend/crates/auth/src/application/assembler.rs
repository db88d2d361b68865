//! Login Result Assembler
//!
//! Shapes the outcome of a successful login: tokens from the issuer,
//! the user summary, and the password expiry status. Stateless and
//! side-effect free; share one instance across all request tasks.

use chrono::NaiveDate;

use crate::domain::entity::{
    authenticated_user::AuthenticatedUser,
    issued_tokens::IssuedTokens,
    login_result::{LoginResult, UserSummary},
};
use crate::domain::password_expiry::{PasswordExpiryPolicy, PasswordStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginResultAssembler {
    policy: PasswordExpiryPolicy,
}

impl LoginResultAssembler {
    pub fn new(policy: PasswordExpiryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PasswordExpiryPolicy {
        &self.policy
    }

    pub fn password_status(&self, user: &AuthenticatedUser, today: NaiveDate) -> PasswordStatus {
        self.policy.evaluate(user, today)
    }

    /// Combine a verified user and freshly issued tokens into a login result
    pub fn assemble(
        &self,
        user: &AuthenticatedUser,
        tokens: IssuedTokens,
        today: NaiveDate,
    ) -> LoginResult {
        let status = self.password_status(user, today);

        LoginResult {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: tokens.token_type,
            expires_in: tokens.expires_in,
            user: UserSummary::from(user),
            password_expired: status.expired,
            password_remaining_days: status.remaining_days,
            password_change_required: status.change_required,
        }
    }
}
