//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the ERP backend:
//! - Password hashing and verification (Argon2id)
//! - Secure random material and base64url encoding

pub mod crypto;
pub mod password;
