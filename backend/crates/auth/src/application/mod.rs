//! Application Layer
//!
//! Use cases and application services.

pub mod assembler;
pub mod config;
pub mod login;

// Re-exports
pub use assembler::LoginResultAssembler;
pub use config::AuthConfig;
pub use login::LoginUseCase;
