//! Sound effect generation requests.

use serde::Serialize;

use crate::error::ValidationError;

/// Body of `POST /sound-generation`.
///
/// ## Examples
///
/// ```rust
/// use elevenlabs_lib::types::SoundGenerationRequest;
///
/// let request = SoundGenerationRequest::new("dog barking", Some(3.0), Some(0.5)).unwrap();
/// assert_eq!(request.duration_seconds(), Some(3.0));
///
/// assert!(SoundGenerationRequest::new("dog barking", Some(30.0), None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundGenerationRequest {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt_influence: Option<f64>,
}

impl SoundGenerationRequest {
    pub const MIN_DURATION: f64 = 0.5;
    pub const MAX_DURATION: f64 = 22.0;

    /// Creates a request.
    ///
    /// `duration_seconds` is `None` to let the server pick a length.
    /// `prompt_influence` is `None` for the server default (0.3).
    ///
    /// ## Errors
    ///
    /// - [`ValidationError::EmptyField`] for a blank prompt
    /// - [`ValidationError::OutOfRange`] for a duration outside `0.5..=22`
    ///   or a prompt influence outside `0..=1`
    pub fn new(
        text: impl Into<String>,
        duration_seconds: Option<f64>,
        prompt_influence: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "text" });
        }
        if let Some(duration) = duration_seconds {
            ValidationError::check_range(
                "duration_seconds",
                duration,
                Self::MIN_DURATION,
                Self::MAX_DURATION,
            )?;
        }
        if let Some(influence) = prompt_influence {
            ValidationError::check_range("prompt_influence", influence, 0.0, 1.0)?;
        }
        Ok(Self {
            text,
            duration_seconds,
            prompt_influence,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        self.duration_seconds
    }

    pub fn prompt_influence(&self) -> Option<f64> {
        self.prompt_influence
    }
}
