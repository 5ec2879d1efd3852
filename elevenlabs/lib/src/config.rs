//! Client settings and the optional TOML config file.
//!
//! [`ElevenLabsConfig`] is what lives on disk; every field is optional.
//! [`ElevenLabsSettings`] is the fully-defaulted runtime view passed to
//! [`crate::ElevenLabsClient::new`].
//!
//! ## Config file
//!
//! ```toml
//! api_key = "sk_..."
//! domain = "my-proxy.example.com"
//! api_version = "v1"
//! cache_dir = "/var/cache/elevenlabs"
//! timeout_secs = 60
//!
//! [auth_header]
//! scheme = "bearer"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::auth::AuthHeader;
use crate::error::{CacheError, ConfigError};

/// Public API host.
pub const DEFAULT_DOMAIN: &str = "api.elevenlabs.io";

/// Current REST API version prefix.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".elevenlabs.toml";

/// On-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevenLabsConfig {
    /// API key. Overridden by an explicit key, overrides the environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Host (or `scheme://host[:port]`) to send requests to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Version path segment, e.g. `v1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Where downloaded audio is cached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    /// Per-request timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Auth header scheme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<AuthHeader>,
}

impl ElevenLabsConfig {
    /// Loads and parses a config file.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid TOML.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Candidate config locations, most specific first.
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("elevenlabs").join("config.toml"));
        }
        paths
    }

    /// Loads the first config file found in [`Self::search_paths`].
    ///
    /// Returns `Ok(None)` when no file exists. A file that exists but
    /// cannot be parsed is an error.
    pub fn discover() -> Result<Option<(PathBuf, Self)>, ConfigError> {
        for path in Self::search_paths() {
            if path.is_file() {
                let config = Self::load_from_path(&path)?;
                tracing::debug!(path = %path.display(), "Loaded ElevenLabs config");
                return Ok(Some((path, config)));
            }
        }
        Ok(None)
    }

    /// Converts to runtime settings, filling defaults.
    pub fn to_settings(&self) -> ElevenLabsSettings {
        let mut settings = ElevenLabsSettings::default();
        if let Some(domain) = &self.domain {
            settings.domain = domain.clone();
        }
        if let Some(version) = &self.api_version {
            settings.api_version = version.clone();
        }
        if let Some(header) = &self.auth_header {
            settings.auth_header = header.clone();
        }
        settings.cache_dir = self.cache_dir.clone();
        settings.timeout = self.timeout_secs.map(Duration::from_secs);
        settings
    }
}

/// Runtime client settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevenLabsSettings {
    /// API host, or a proxy override. May include a scheme and port.
    pub domain: String,
    /// Version path segment.
    pub api_version: String,
    /// How the key is attached to requests.
    pub auth_header: AuthHeader,
    /// Cache directory override. `None` uses the platform cache dir.
    pub cache_dir: Option<PathBuf>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl Default for ElevenLabsSettings {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            auth_header: AuthHeader::default(),
            cache_dir: None,
            timeout: None,
        }
    }
}

impl ElevenLabsSettings {
    /// Sets the domain (proxy override).
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Sets the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Sets the auth header scheme.
    #[must_use]
    pub fn with_auth_header(mut self, header: AuthHeader) -> Self {
        self.auth_header = header;
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the versioned base URL, without a trailing slash.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use elevenlabs_lib::config::ElevenLabsSettings;
    ///
    /// let settings = ElevenLabsSettings::default();
    /// assert_eq!(settings.base_url().unwrap(), "https://api.elevenlabs.io/v1");
    ///
    /// let proxied = ElevenLabsSettings::default().with_domain("http://localhost:8080");
    /// assert_eq!(proxied.base_url().unwrap(), "http://localhost:8080/v1");
    /// ```
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let domain = self.domain.trim();
        let (scheme, host) = domain.split_once("://").unwrap_or(("https", domain));
        let host = host.trim_end_matches('/');
        if host.is_empty() {
            return Err(url::ParseError::EmptyHost.into());
        }
        let root = format!("{scheme}://{host}");
        let version = self.api_version.trim_matches('/');
        let base = if version.is_empty() {
            root
        } else {
            format!("{root}/{version}")
        };
        let parsed = Url::parse(&base)?;
        match parsed.host_str() {
            Some(h) if !h.is_empty() && !matches!(h, "http" | "https") => Ok(base),
            _ => Err(url::ParseError::EmptyHost.into()),
        }
    }

    /// The cache directory, defaulting to `{platform cache}/elevenlabs`.
    pub fn resolved_cache_dir(&self) -> Result<PathBuf, CacheError> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::cache_dir()
                .map(|d| d.join("elevenlabs"))
                .ok_or(CacheError::NoCacheDir),
        }
    }
}
