//! Presentation Layer
//!
//! Wire shapes for the login exchange.

pub mod dto;

pub use dto::{LoginRequest, LoginResponse, UserSummaryResponse};
