//! Authenticated User
//!
//! Identity and credential-age data handed over by a credential verifier.
//! Read-only to everything downstream of verification.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::value_object::{
    email::Email, role::Role, user_id::UserId, user_name::UserName,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub username: UserName,
    pub display_name: String,
    pub email: Option<Email>,
    pub role: Role,
    /// When the current password was set; `None` if it was never changed
    /// since the account was provisioned
    pub password_changed_at: Option<DateTime<Utc>>,
    /// Service and kiosk accounts can be exempt from password expiry
    pub password_never_expires: bool,
}

impl AuthenticatedUser {
    /// Whole calendar days (UTC) between the last password change and `today`
    ///
    /// A change timestamp later than `today` counts as zero days.
    pub fn password_age_days(&self, today: NaiveDate) -> Option<i64> {
        self.password_changed_at
            .map(|changed_at| (today - changed_at.date_naive()).num_days().max(0))
    }
}
