//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod sign_up;
pub mod token_auth;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token_auth::{TokenAuthInput, TokenAuthOutput, TokenAuthUseCase};
