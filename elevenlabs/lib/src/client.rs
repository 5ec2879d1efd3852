//! The shared HTTP context and the top-level client.
//!
//! [`ElevenLabsClient`] owns one [`ClientContext`] behind an `Arc` and hands
//! it to every endpoint group it creates. Endpoint groups are cheap to make
//! and hold no state of their own.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth::ElevenLabsAuthentication;
use crate::cache::AudioCache;
use crate::config::{ElevenLabsConfig, ElevenLabsSettings};
use crate::endpoints::{
    DubbingEndpoint, HistoryEndpoint, ModelsEndpoint, SoundGenerationEndpoint,
    TextToSpeechEndpoint, UserEndpoint, VoiceGenerationEndpoint, VoicesEndpoint,
};
use crate::error::{ClientError, ConfigError, Result, ValidationError};

const USER_AGENT: &str = concat!("elevenlabs-rs/", env!("CARGO_PKG_VERSION"));

/// Empty query string for calls without parameters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Immutable state shared by all endpoint groups.
#[derive(Debug)]
pub struct ClientContext {
    http: reqwest::Client,
    auth: ElevenLabsAuthentication,
    settings: ElevenLabsSettings,
    base_url: String,
    cache: AudioCache,
}

impl ClientContext {
    /// Builds the HTTP client and resolves the base URL and cache root.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidUrl`] if the domain does not form a valid URL
    /// - [`ConfigError::HttpClient`] if the HTTP client cannot be built
    /// - [`crate::error::CacheError::NoCacheDir`] if no cache directory is
    ///   configured and the platform has none
    pub fn new(auth: ElevenLabsAuthentication, settings: ElevenLabsSettings) -> Result<Self> {
        let base_url = settings.base_url()?;
        let cache = AudioCache::new(settings.resolved_cache_dir()?);

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ConfigError::HttpClient)?;

        tracing::debug!(
            base_url = %base_url,
            cache_dir = %cache.root().display(),
            "Created ElevenLabs client context"
        );

        Ok(Self {
            http,
            auth,
            settings,
            base_url,
            cache,
        })
    }

    /// `https://{domain}/{version}` without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn settings(&self) -> &ElevenLabsSettings {
        &self.settings
    }

    pub fn cache(&self) -> &AudioCache {
        &self.cache
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let (name, value) = self.settings.auth_header.header_pair(self.auth.api_key());
        self.http.request(method, url).header(name, value)
    }

    /// Sends a request and turns any non-2xx answer into
    /// [`ClientError::HttpStatus`].
    pub(crate) async fn send(
        &self,
        method: Method,
        url: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Response> {
        let context = format!("{method} {url}");
        let response = build(self.request(method, url))
            .send()
            .await
            .map_err(ClientError::from)?;

        let status = response.status();
        tracing::debug!(request = %context, status = status.as_u16(), "ElevenLabs response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
                context,
                body,
            }
            .into());
        }

        Ok(response)
    }

    pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let body = response.bytes().await.map_err(ClientError::from)?;
        Ok(serde_json::from_slice(&body).map_err(ValidationError::from)?)
    }

    pub(crate) async fn get_json<T, Q>(&self, url: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, url, |r| r.query(query)).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn post_json<T, B>(&self, url: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(Method::POST, url, |r| r.json(body)).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(Method::DELETE, url, |r| r).await?;
        Self::read_json(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self.send(Method::POST, url, |r| r.multipart(form)).await?;
        Self::read_json(response).await
    }

    /// GETs a binary body, returning the response headers with it.
    pub(crate) async fn get_bytes<Q>(&self, url: &str, query: &Q) -> Result<(HeaderMap, Bytes)>
    where
        Q: Serialize + ?Sized,
    {
        let response = self.send(Method::GET, url, |r| r.query(query)).await?;
        Self::read_bytes(response).await
    }

    /// POSTs a JSON body and returns a binary answer with its headers.
    pub(crate) async fn post_for_bytes<B, Q>(
        &self,
        url: &str,
        query: &Q,
        body: &B,
    ) -> Result<(HeaderMap, Bytes)>
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(Method::POST, url, |r| r.query(query).json(body))
            .await?;
        Self::read_bytes(response).await
    }

    async fn read_bytes(response: Response) -> Result<(HeaderMap, Bytes)> {
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(ClientError::from)?;
        Ok((headers, body))
    }
}

/// Returns a header as a non-empty string.
pub(crate) fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Entry point to the ElevenLabs API.
///
/// ## Examples
///
/// ```rust,no_run
/// use elevenlabs_lib::{ElevenLabsClient, ElevenLabsSettings};
/// use elevenlabs_lib::auth::ElevenLabsAuthentication;
///
/// # async fn run() -> elevenlabs_lib::error::Result<()> {
/// let auth = ElevenLabsAuthentication::new("sk_...")?;
/// let client = ElevenLabsClient::new(auth, ElevenLabsSettings::default())?;
///
/// for voice in client.voices().get_all_voices().await? {
///     println!("{} ({})", voice.name, voice.id());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    context: Arc<ClientContext>,
}

impl ElevenLabsClient {
    pub fn new(auth: ElevenLabsAuthentication, settings: ElevenLabsSettings) -> Result<Self> {
        Ok(Self {
            context: Arc::new(ClientContext::new(auth, settings)?),
        })
    }

    /// Builds a client with default settings and the API key from the
    /// environment.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::error::AuthError::MissingApiKey`] if no key is set.
    pub fn from_env() -> Result<Self> {
        Self::new(ElevenLabsAuthentication::from_env()?, ElevenLabsSettings::default())
    }

    /// Builds a client from an optional explicit key and an optional config
    /// file, falling back to the environment for the key.
    pub fn from_config(api_key: Option<&str>, config: Option<&ElevenLabsConfig>) -> Result<Self> {
        let auth = ElevenLabsAuthentication::resolve(api_key, config)?;
        let settings = config.map(ElevenLabsConfig::to_settings).unwrap_or_default();
        Self::new(auth, settings)
    }

    /// Like [`Self::from_config`], using the first config file found by
    /// [`ElevenLabsConfig::discover`].
    pub fn discover(api_key: Option<&str>) -> Result<Self> {
        let config = ElevenLabsConfig::discover()?.map(|(_, config)| config);
        Self::from_config(api_key, config.as_ref())
    }

    pub fn context(&self) -> &Arc<ClientContext> {
        &self.context
    }

    pub fn user(&self) -> UserEndpoint {
        UserEndpoint::new(Arc::clone(&self.context))
    }

    pub fn voices(&self) -> VoicesEndpoint {
        VoicesEndpoint::new(Arc::clone(&self.context))
    }

    pub fn text_to_speech(&self) -> TextToSpeechEndpoint {
        TextToSpeechEndpoint::new(Arc::clone(&self.context))
    }

    pub fn history(&self) -> HistoryEndpoint {
        HistoryEndpoint::new(Arc::clone(&self.context))
    }

    pub fn models(&self) -> ModelsEndpoint {
        ModelsEndpoint::new(Arc::clone(&self.context))
    }

    pub fn sound_generation(&self) -> SoundGenerationEndpoint {
        SoundGenerationEndpoint::new(Arc::clone(&self.context))
    }

    pub fn voice_generation(&self) -> VoiceGenerationEndpoint {
        VoiceGenerationEndpoint::new(Arc::clone(&self.context))
    }

    pub fn dubbing(&self) -> DubbingEndpoint {
        DubbingEndpoint::new(Arc::clone(&self.context))
    }
}
