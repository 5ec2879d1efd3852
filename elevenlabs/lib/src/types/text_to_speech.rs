//! Text-to-speech requests.

use serde::Serialize;

use super::audio::OutputFormat;
use super::voice::VoiceSettings;
use crate::cache::CacheKey;
use crate::error::ValidationError;

/// A text-to-speech request.
///
/// Body fields serialize to the JSON body. `output_format` and
/// `optimize_streaming_latency` travel as query parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToSpeechRequest {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_settings: Option<VoiceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    previous_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next_text: Option<String>,
    #[serde(skip)]
    output_format: OutputFormat,
    #[serde(skip)]
    optimize_streaming_latency: Option<u8>,
}

impl TextToSpeechRequest {
    /// Highest accepted `optimize_streaming_latency` level.
    pub const MAX_LATENCY_OPTIMIZATION: u8 = 4;

    /// Creates a request for `text` with server-default model and settings.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::EmptyField`] for blank text.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        Ok(Self {
            text,
            model_id: None,
            voice_settings: None,
            language_code: None,
            previous_text: None,
            next_text: None,
            output_format: OutputFormat::default(),
            optimize_streaming_latency: None,
        })
    }

    #[must_use]
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    #[must_use]
    pub fn with_voice_settings(mut self, settings: VoiceSettings) -> Self {
        self.voice_settings = Some(settings);
        self
    }

    /// ISO 639-1 language hint (multilingual/turbo models only).
    #[must_use]
    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }

    /// Text spoken before this request, for prosody continuity.
    #[must_use]
    pub fn with_previous_text(mut self, text: impl Into<String>) -> Self {
        self.previous_text = Some(text.into());
        self
    }

    /// Text spoken after this request, for prosody continuity.
    #[must_use]
    pub fn with_next_text(mut self, text: impl Into<String>) -> Self {
        self.next_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Trades quality for latency, `0` (off) to `4` (max).
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] for values above 4.
    pub fn with_optimize_streaming_latency(mut self, level: u8) -> Result<Self, ValidationError> {
        ValidationError::check_range(
            "optimize_streaming_latency",
            f64::from(level),
            0.0,
            f64::from(Self::MAX_LATENCY_OPTIMIZATION),
        )?;
        self.optimize_streaming_latency = Some(level);
        Ok(self)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    pub fn voice_settings(&self) -> Option<&VoiceSettings> {
        self.voice_settings.as_ref()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn optimize_streaming_latency(&self) -> Option<u8> {
        self.optimize_streaming_latency
    }

    /// Query parameters for the request URL.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("output_format", self.output_format.to_string())];
        if let Some(level) = self.optimize_streaming_latency {
            query.push(("optimize_streaming_latency", level.to_string()));
        }
        query
    }

    /// Deterministic cache key for this request spoken by `voice_id`.
    ///
    /// Covers every input that changes the audio: voice settings, language
    /// and surrounding text as well as voice, model, text and format.
    pub fn cache_key(&self, voice_id: &str) -> CacheKey {
        let key = CacheKey::new(
            voice_id,
            self.model_id.as_deref().unwrap_or_default(),
            self.text.as_str(),
            self.output_format.as_ref(),
        );
        if self.voice_settings.is_none()
            && self.language_code.is_none()
            && self.previous_text.is_none()
            && self.next_text.is_none()
        {
            return key;
        }
        let extra = (
            &self.voice_settings,
            &self.language_code,
            &self.previous_text,
            &self.next_text,
        );
        match serde_json::to_string(&extra) {
            Ok(extra) => key.with_settings(extra),
            Err(_) => key,
        }
    }
}
