//! Error types for the ElevenLabs client.
//!
//! Errors are layered by failure category. [`ElevenLabsError`] aggregates
//! them so callers can use `?` everywhere and still match on the category
//! when they need to.

mod api_error;
mod auth_error;
mod cache_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ElevenLabsError;
pub use auth_error::AuthError;
pub use cache_error::CacheError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;

/// Convenience alias used by every fallible operation in this crate.
pub type Result<T, E = ElevenLabsError> = std::result::Result<T, E>;
