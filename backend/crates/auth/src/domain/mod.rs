//! Domain Layer
//!
//! Entities, value objects, the password expiry policy, and the
//! collaborator traits the login flow depends on.

pub mod entity;
pub mod password_expiry;
pub mod traits;
pub mod value_object;

// Re-exports
pub use entity::{AuthenticatedUser, IssuedTokens, LoginResult, UserAccount, UserSummary};
pub use password_expiry::{PasswordExpiryPolicy, PasswordStatus};
pub use traits::{CredentialVerifier, TokenIssuer};
