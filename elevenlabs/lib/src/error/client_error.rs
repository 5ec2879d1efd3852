//! HTTP client and network errors.

use thiserror::Error;

/// Errors from the HTTP layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("HTTP {status} from {context}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Method and URL of the failed request.
        context: String,
        /// Raw response body text.
        body: String,
    },

    /// A status poll gave up before the remote job finished.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// How long the caller waited.
        duration_ms: u64,
    },
}

impl ClientError {
    /// Returns the HTTP status code if the server produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Timeout { .. } => None,
        }
    }
}
