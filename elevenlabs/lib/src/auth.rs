//! API key resolution and the auth header scheme.
//!
//! Resolution order is: explicit key, then config file, then environment.
//! A client cannot be built without a key, so a missing key fails fast at
//! construction time rather than on the first request.

use serde::{Deserialize, Serialize};

use crate::config::ElevenLabsConfig;
use crate::error::AuthError;

/// Environment variables checked for an API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["ELEVEN_LABS_API_KEY", "ELEVENLABS_API_KEY"];

/// Default header used by the ElevenLabs API for key auth.
pub const DEFAULT_API_KEY_HEADER: &str = "xi-api-key";

/// How the API key is attached to each request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum AuthHeader {
    /// Raw key in a named header (`xi-api-key` for the public API).
    ApiKey {
        /// Header name.
        header: String,
    },
    /// `Authorization: Bearer <key>`, as expected by some proxies.
    Bearer,
}

impl Default for AuthHeader {
    fn default() -> Self {
        Self::ApiKey {
            header: DEFAULT_API_KEY_HEADER.to_string(),
        }
    }
}

impl AuthHeader {
    /// Returns the `(name, value)` header pair for `api_key`.
    pub fn header_pair(&self, api_key: &str) -> (String, String) {
        match self {
            Self::ApiKey { header } => (header.clone(), api_key.to_string()),
            Self::Bearer => ("Authorization".to_string(), format!("Bearer {api_key}")),
        }
    }
}

/// Resolved ElevenLabs credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct ElevenLabsAuthentication {
    api_key: String,
}

impl std::fmt::Debug for ElevenLabsAuthentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsAuthentication")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ElevenLabsAuthentication {
    /// Wraps an explicit API key.
    ///
    /// ## Errors
    ///
    /// Returns [`AuthError::MissingApiKey`] for a blank key and
    /// [`AuthError::InvalidKeyFormat`] if the key contains characters that
    /// are not allowed in an HTTP header.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AuthError> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(AuthError::MissingApiKey);
        }
        if api_key.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(AuthError::InvalidKeyFormat);
        }
        Ok(Self { api_key })
    }

    /// Reads the key from [`API_KEY_ENV_VARS`].
    pub fn from_env() -> Result<Self, AuthError> {
        let key = API_KEY_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or(AuthError::MissingApiKey)?;
        Self::new(key)
    }

    /// Resolves credentials from an explicit key, a loaded config file, or the
    /// environment, in that order.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use elevenlabs_lib::auth::ElevenLabsAuthentication;
    ///
    /// let auth = ElevenLabsAuthentication::resolve(Some("sk_test"), None).unwrap();
    /// assert_eq!(auth.api_key(), "sk_test");
    /// ```
    pub fn resolve(
        explicit: Option<&str>,
        config: Option<&ElevenLabsConfig>,
    ) -> Result<Self, AuthError> {
        if let Some(key) = explicit.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("Using explicit ElevenLabs API key");
            return Self::new(key);
        }

        if let Some(key) = config
            .and_then(|c| c.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
        {
            tracing::debug!("Using ElevenLabs API key from config file");
            return Self::new(key);
        }

        tracing::debug!("Falling back to ElevenLabs API key from environment");
        Self::from_env()
    }

    /// The raw API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: env-mutating tests are serialized with #[serial]
        unsafe {
            for var in API_KEY_ENV_VARS {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_new_rejects_blank() {
        assert!(matches!(
            ElevenLabsAuthentication::new("   "),
            Err(AuthError::MissingApiKey)
        ));
    }

    #[test]
    fn test_new_rejects_embedded_whitespace() {
        assert!(matches!(
            ElevenLabsAuthentication::new("sk abc"),
            Err(AuthError::InvalidKeyFormat)
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let auth = ElevenLabsAuthentication::new("sk_secret").unwrap();
        let debug = format!("{auth:?}");
        assert!(!debug.contains("sk_secret"));
    }

    #[test]
    #[serial]
    fn test_explicit_key_wins_over_config_and_env() {
        clear_env();
        // SAFETY: serialized
        unsafe { std::env::set_var("ELEVEN_LABS_API_KEY", "from-env") };
        let config = ElevenLabsConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };

        let auth = ElevenLabsAuthentication::resolve(Some("explicit"), Some(&config)).unwrap();
        assert_eq!(auth.api_key(), "explicit");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_config_wins_over_env() {
        clear_env();
        // SAFETY: serialized
        unsafe { std::env::set_var("ELEVEN_LABS_API_KEY", "from-env") };
        let config = ElevenLabsConfig {
            api_key: Some("from-config".to_string()),
            ..Default::default()
        };

        let auth = ElevenLabsAuthentication::resolve(None, Some(&config)).unwrap();
        assert_eq!(auth.api_key(), "from-config");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_fallback_checks_both_names() {
        clear_env();
        // SAFETY: serialized
        unsafe { std::env::set_var("ELEVENLABS_API_KEY", "alt-env") };

        let auth = ElevenLabsAuthentication::resolve(None, None).unwrap();
        assert_eq!(auth.api_key(), "alt-env");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_everywhere_fails() {
        clear_env();
        let result = ElevenLabsAuthentication::resolve(None, None);
        assert!(matches!(result, Err(AuthError::MissingApiKey)));
    }

    #[test]
    fn test_header_pairs() {
        let (name, value) = AuthHeader::default().header_pair("k");
        assert_eq!(name, "xi-api-key");
        assert_eq!(value, "k");

        let (name, value) = AuthHeader::Bearer.header_pair("k");
        assert_eq!(name, "Authorization");
        assert_eq!(value, "Bearer k");
    }
}
