//! Top-level error type.

use super::{AuthError, CacheError, ClientError, ConfigError, ValidationError};
use thiserror::Error;

/// Top-level error type for all client operations.
///
/// ## Examples
///
/// ```rust
/// use elevenlabs_lib::error::{ElevenLabsError, ClientError};
///
/// fn describe(err: &ElevenLabsError) -> &'static str {
///     match err {
///         ElevenLabsError::Client(ClientError::HttpStatus { .. }) => "server said no",
///         ElevenLabsError::Client(_) => "network",
///         ElevenLabsError::Validation(_) => "bad input",
///         ElevenLabsError::Auth(_) => "credentials",
///         ElevenLabsError::Config(_) => "configuration",
///         ElevenLabsError::Cache(_) => "local cache",
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum ElevenLabsError {
    /// HTTP transport and status errors.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Request argument or response body validation errors.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing or malformed credentials.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Settings and config file errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local audio cache I/O errors.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<reqwest::Error> for ElevenLabsError {
    fn from(err: reqwest::Error) -> Self {
        Self::Client(ClientError::from(err))
    }
}

impl ElevenLabsError {
    /// Returns the HTTP status code when the server rejected the request.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_client_error() {
        let err: ElevenLabsError = ClientError::Timeout { duration_ms: 5000 }.into();
        assert!(matches!(err, ElevenLabsError::Client(_)));
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_from_auth_error() {
        let err: ElevenLabsError = AuthError::MissingApiKey.into();
        assert!(matches!(err, ElevenLabsError::Auth(_)));
    }

    #[test]
    fn test_status_code_passthrough() {
        let err: ElevenLabsError = ClientError::HttpStatus {
            status: 401,
            context: "GET https://api.elevenlabs.io/v1/user".to_string(),
            body: "unauthorized".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), Some(401));
    }

    #[test]
    fn test_display_is_transparent() {
        let err = ElevenLabsError::Validation(ValidationError::EmptyField { field: "name" });
        assert_eq!(err.to_string(), "Field `name` must not be empty");
    }
}
