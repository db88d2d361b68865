//! User Account Entity
//!
//! What a credential store keeps per user: the profile handed out on
//! success, the password hash, and failure tracking for lockout.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::authenticated_user::AuthenticatedUser;
use crate::domain::value_object::{account_status::AccountStatus, user_password::UserPassword};

#[derive(Debug, Clone)]
pub struct UserAccount {
    pub user: AuthenticatedUser,
    pub password_hash: UserPassword,
    pub status: AccountStatus,
    /// Consecutive login failure count
    pub login_failed_count: u16,
    pub last_failed_at: Option<DateTime<Utc>>,
    /// Temporary lockout after too many failures
    pub locked_until: Option<DateTime<Utc>>,
}

impl UserAccount {
    /// Maximum login failures before temporary lockout
    pub const MAX_LOGIN_FAILURES: u16 = 5;
    /// Lockout duration in minutes
    pub const LOCKOUT_MINUTES: i64 = 15;

    pub fn new(user: AuthenticatedUser, password_hash: UserPassword) -> Self {
        Self {
            user,
            password_hash,
            status: AccountStatus::Active,
            login_failed_count: 0,
            last_failed_at: None,
            locked_until: None,
        }
    }

    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.is_some_and(|until| now < until)
    }

    pub fn record_failure(&mut self, now: DateTime<Utc>) {
        self.login_failed_count = self.login_failed_count.saturating_add(1);
        self.last_failed_at = Some(now);

        if self.login_failed_count >= Self::MAX_LOGIN_FAILURES {
            self.locked_until = Some(now + Duration::minutes(Self::LOCKOUT_MINUTES));
        }
    }

    pub fn reset_failures(&mut self) {
        self.login_failed_count = 0;
        self.last_failed_at = None;
        self.locked_until = None;
    }
}
