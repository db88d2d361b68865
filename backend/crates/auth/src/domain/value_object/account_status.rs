//! Account Status Value Object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Back-office account status
///
/// Staff who leave are disabled rather than deleted so that sales and
/// purchasing records keep a valid operator reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[default]
    Active,
    Disabled,
}

impl AccountStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    #[inline]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
