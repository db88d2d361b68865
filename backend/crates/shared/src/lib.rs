//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary that every ERP module agrees on:
//! - Common error types and result aliases
//! - Typed ID wrappers
//!
//! Anything domain specific belongs in the owning crate, not here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
