//! Value Object Module

pub mod account_status;
pub mod email;
pub mod login_credentials;
pub mod role;
pub mod user_id;
pub mod user_name;
pub mod user_password;
