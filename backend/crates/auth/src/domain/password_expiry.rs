//! Password Expiry Policy
//!
//! Decides how many days a user's password has left and whether the
//! client must prompt for a change. Pure computation: no clock, no I/O.
//!
//! ## Rules
//! - `remaining = max_age_days - days_since_last_change`, floored at 0
//! - `expired = remaining <= 0`
//! - `change_required = expired || remaining <= warning_days`
//! - Policy disabled or account exempt: `remaining = -1`, both flags false
//! - No recorded change under an enforced policy: treated as expired

use chrono::NaiveDate;

use crate::domain::entity::authenticated_user::AuthenticatedUser;
use crate::error::{AuthError, AuthResult};

/// Sentinel for "expiry does not apply"
pub const NOT_APPLICABLE_DAYS: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExpiryLimits {
    max_age_days: i64,
    warning_days: i64,
}

/// Configured password lifetime rules
///
/// Thresholds are validated on construction, so a value of this type is
/// always consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PasswordExpiryPolicy {
    limits: Option<ExpiryLimits>,
}

impl PasswordExpiryPolicy {
    /// Enforced policy
    ///
    /// Fails with `PolicyMisconfiguration` when `max_age_days` is not
    /// positive, `warning_days` is negative, or the warning window is longer
    /// than the password lifetime.
    pub fn new(max_age_days: i64, warning_days: i64) -> AuthResult<Self> {
        if max_age_days <= 0 {
            return Err(AuthError::PolicyMisconfiguration(format!(
                "max age must be positive (got {} days)",
                max_age_days
            )));
        }
        if warning_days < 0 {
            return Err(AuthError::PolicyMisconfiguration(format!(
                "warning window must not be negative (got {} days)",
                warning_days
            )));
        }
        if warning_days > max_age_days {
            return Err(AuthError::PolicyMisconfiguration(format!(
                "warning window ({} days) exceeds max age ({} days)",
                warning_days, max_age_days
            )));
        }

        Ok(Self {
            limits: Some(ExpiryLimits {
                max_age_days,
                warning_days,
            }),
        })
    }

    /// Passwords never expire
    pub const fn disabled() -> Self {
        Self { limits: None }
    }

    /// Build from optional settings
    ///
    /// Both absent disables the policy; only one present is a
    /// misconfiguration, since guessing the other threshold is never safe.
    pub fn from_settings(max_age_days: Option<i64>, warning_days: Option<i64>) -> AuthResult<Self> {
        match (max_age_days, warning_days) {
            (None, None) => Ok(Self::disabled()),
            (Some(max_age), Some(warning)) => Self::new(max_age, warning),
            (Some(_), None) => Err(AuthError::PolicyMisconfiguration(
                "max age is set but the warning window is not".to_string(),
            )),
            (None, Some(_)) => Err(AuthError::PolicyMisconfiguration(
                "warning window is set but max age is not".to_string(),
            )),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limits.is_some()
    }

    pub fn max_age_days(&self) -> Option<i64> {
        self.limits.map(|l| l.max_age_days)
    }

    pub fn warning_days(&self) -> Option<i64> {
        self.limits.map(|l| l.warning_days)
    }

    /// Evaluate the policy for `user` as of `today`
    pub fn evaluate(&self, user: &AuthenticatedUser, today: NaiveDate) -> PasswordStatus {
        let Some(limits) = self.limits else {
            return PasswordStatus::NOT_APPLICABLE;
        };
        if user.password_never_expires {
            return PasswordStatus::NOT_APPLICABLE;
        }

        let Some(age_days) = user.password_age_days(today) else {
            return PasswordStatus::EXPIRED;
        };

        let remaining = limits.max_age_days - age_days;
        let expired = remaining <= 0;

        PasswordStatus {
            // Floored so an overdue password never collides with the -1 sentinel
            remaining_days: remaining.max(0),
            expired,
            change_required: expired || remaining <= limits.warning_days,
        }
    }
}

/// Outcome of evaluating the expiry policy for one user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStatus {
    /// Days until forced expiry, or [`NOT_APPLICABLE_DAYS`]
    pub remaining_days: i64,
    pub expired: bool,
    pub change_required: bool,
}

impl PasswordStatus {
    pub const NOT_APPLICABLE: Self = Self {
        remaining_days: NOT_APPLICABLE_DAYS,
        expired: false,
        change_required: false,
    };

    pub const EXPIRED: Self = Self {
        remaining_days: 0,
        expired: true,
        change_required: true,
    };

    pub fn is_applicable(&self) -> bool {
        self.remaining_days != NOT_APPLICABLE_DAYS
    }
}
