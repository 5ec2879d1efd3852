//! Authentication errors.

use thiserror::Error;

/// Errors raised while resolving credentials.
///
/// These are fatal at client construction time.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No API key was found in the explicit argument, config file or environment.
    #[error(
        "Missing ElevenLabs API key (checked explicit key, config file, ELEVEN_LABS_API_KEY, ELEVENLABS_API_KEY)"
    )]
    MissingApiKey,

    /// The API key cannot be used as an HTTP header value.
    #[error("Invalid API key format")]
    InvalidKeyFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_mentions_env_vars() {
        let msg = AuthError::MissingApiKey.to_string();
        assert!(msg.contains("ELEVEN_LABS_API_KEY"));
        assert!(msg.contains("ELEVENLABS_API_KEY"));
    }

    #[test]
    fn test_invalid_key_format_display() {
        assert_eq!(AuthError::InvalidKeyFormat.to_string(), "Invalid API key format");
    }
}
