//! Infrastructure Layer
//!
//! Credential verification and token minting implementations.

pub mod jwt;
pub mod memory;

pub use jwt::{JwtTokenIssuer, TokenClaims, TokenKind};
pub use memory::{InMemoryCredentialStore, UserRecord};
