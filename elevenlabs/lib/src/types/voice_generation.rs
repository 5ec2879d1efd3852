//! Generated (preview) voice requests and options.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::null_as_default;
use crate::error::ValidationError;

/// Voice gender for generated voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    Female,
    Male,
}

/// Apparent age for generated voices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Age {
    Young,
    MiddleAged,
    Old,
}

/// Accent code for generated voices.
///
/// The server publishes the accepted set via
/// [`crate::endpoints::VoiceGenerationEndpoint::get_voice_generation_options`];
/// the constants cover the common ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Accent(String);

impl Accent {
    pub const AMERICAN: &'static str = "american";
    pub const BRITISH: &'static str = "british";
    pub const AFRICAN: &'static str = "african";
    pub const AUSTRALIAN: &'static str = "australian";
    pub const INDIAN: &'static str = "indian";

    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn american() -> Self {
        Self::new(Self::AMERICAN)
    }

    pub fn british() -> Self {
        Self::new(Self::BRITISH)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Accent {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

/// Body of `POST /voice-generation/generate-voice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedVoiceRequest {
    text: String,
    gender: Gender,
    accent: Accent,
    age: Age,
    accent_strength: f64,
}

impl GeneratedVoiceRequest {
    pub const MIN_TEXT_CHARS: usize = 100;
    pub const MAX_TEXT_CHARS: usize = 1000;
    pub const MIN_ACCENT_STRENGTH: f64 = 0.3;
    pub const MAX_ACCENT_STRENGTH: f64 = 2.0;

    /// Creates a request.
    ///
    /// `accent_strength` is clamped into `0.3..=2.0` and never causes an
    /// error (a NaN strength becomes the minimum).
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::LengthOutOfRange`] when `text` is shorter
    /// than 100 or longer than 1000 characters.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use elevenlabs_lib::types::{Accent, Age, Gender, GeneratedVoiceRequest};
    ///
    /// let request = GeneratedVoiceRequest::new(
    ///     "A".repeat(100),
    ///     Gender::Male,
    ///     Accent::american(),
    ///     Age::MiddleAged,
    ///     5.0,
    /// )
    /// .unwrap();
    /// assert_eq!(request.accent_strength(), 2.0);
    /// ```
    pub fn new(
        text: impl Into<String>,
        gender: Gender,
        accent: impl Into<Accent>,
        age: Age,
        accent_strength: f64,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        let chars = text.chars().count();
        if !(Self::MIN_TEXT_CHARS..=Self::MAX_TEXT_CHARS).contains(&chars) {
            return Err(ValidationError::LengthOutOfRange {
                field: "text",
                actual: chars,
                min: Self::MIN_TEXT_CHARS,
                max: Self::MAX_TEXT_CHARS,
            });
        }

        let accent_strength = if accent_strength.is_nan() {
            Self::MIN_ACCENT_STRENGTH
        } else {
            accent_strength.clamp(Self::MIN_ACCENT_STRENGTH, Self::MAX_ACCENT_STRENGTH)
        };

        Ok(Self {
            text,
            gender,
            accent: accent.into(),
            age,
            accent_strength,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn accent(&self) -> &Accent {
        &self.accent
    }

    pub fn age(&self) -> Age {
        self.age
    }

    pub fn accent_strength(&self) -> f64 {
        self.accent_strength
    }
}

/// A `{name, code}` pair from the voice generation options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub name: String,
    pub code: String,
}

/// Parameters accepted by the voice generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVoiceOptions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub genders: Vec<VoiceOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub accents: Vec<VoiceOption>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ages: Vec<VoiceOption>,
    pub minimum_characters: u32,
    pub maximum_characters: u32,
    pub minimum_accent_strength: f64,
    pub maximum_accent_strength: f64,
}

/// Body of `POST /voice-generation/create-voice`.
///
/// Promotes a generated preview voice into a permanent voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateVoiceRequest {
    voice_name: String,
    voice_description: String,
    generated_voice_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<BTreeMap<String, String>>,
}

impl CreateVoiceRequest {
    /// ## Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if the name or generated
    /// voice id is blank.
    pub fn new(
        voice_name: impl Into<String>,
        voice_description: impl Into<String>,
        generated_voice_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let voice_name = voice_name.into();
        let generated_voice_id = generated_voice_id.into();
        if voice_name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "voice_name" });
        }
        if generated_voice_id.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "generated_voice_id",
            });
        }
        Ok(Self {
            voice_name,
            voice_description: voice_description.into(),
            generated_voice_id,
            labels: None,
        })
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn voice_name(&self) -> &str {
        &self.voice_name
    }

    pub fn generated_voice_id(&self) -> &str {
        &self.generated_voice_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn text(len: usize) -> String {
        "A".repeat(len)
    }

    #[test]
    fn test_accent_strength_clamped_high() {
        let request =
            GeneratedVoiceRequest::new(text(100), Gender::Male, Accent::american(), Age::MiddleAged, 5.0)
                .unwrap();
        assert_eq!(request.accent_strength(), 2.0);
    }

    #[test]
    fn test_accent_strength_clamped_low() {
        for low in [0.0, -3.0, f64::NAN] {
            let request =
                GeneratedVoiceRequest::new(text(150), Gender::Female, "british", Age::Young, low)
                    .unwrap();
            assert_eq!(request.accent_strength(), 0.3);
        }
    }

    #[test]
    fn test_accent_strength_in_range_unchanged() {
        let request =
            GeneratedVoiceRequest::new(text(500), Gender::Female, "indian", Age::Old, 1.25).unwrap();
        assert_eq!(request.accent_strength(), 1.25);
    }

    #[test]
    fn test_short_text_rejected() {
        let result = GeneratedVoiceRequest::new(
            "short text",
            Gender::Male,
            Accent::american(),
            Age::MiddleAged,
            1.0,
        );
        assert!(matches!(
            result,
            Err(ValidationError::LengthOutOfRange { actual: 10, min: 100, max: 1000, .. })
        ));
    }

    #[test]
    fn test_text_length_bounds() {
        assert!(GeneratedVoiceRequest::new(text(99), Gender::Male, "american", Age::Old, 1.0).is_err());
        assert!(GeneratedVoiceRequest::new(text(1000), Gender::Male, "american", Age::Old, 1.0).is_ok());
        assert!(GeneratedVoiceRequest::new(text(1001), Gender::Male, "american", Age::Old, 1.0).is_err());
    }

    #[test]
    fn test_text_length_counts_chars_not_bytes() {
        // 100 two-byte characters
        let request = GeneratedVoiceRequest::new("é".repeat(100), Gender::Female, "british", Age::Young, 1.0);
        assert!(request.is_ok());
    }

    #[test]
    fn test_wire_format() {
        let request =
            GeneratedVoiceRequest::new(text(100), Gender::Female, "british", Age::MiddleAged, 1.0).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["gender"], "female");
        assert_eq!(value["age"], "middle_aged");
        assert_eq!(value["accent"], "british");
        assert_eq!(value["accent_strength"], 1.0);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(Gender::from_str("Male").unwrap(), Gender::Male);
        assert_eq!(Age::from_str("middle_aged").unwrap(), Age::MiddleAged);
        assert_eq!(Age::MiddleAged.to_string(), "middle_aged");
    }

    #[test]
    fn test_options_round_trip() {
        let input = json!({
            "genders": [{ "name": "Female", "code": "female" }, { "name": "Male", "code": "male" }],
            "accents": [{ "name": "British", "code": "british" }],
            "ages": [{ "name": "Young", "code": "young" }],
            "minimum_characters": 100,
            "maximum_characters": 1000,
            "minimum_accent_strength": 0.3,
            "maximum_accent_strength": 2.0
        });
        let options: GeneratedVoiceOptions = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&options).unwrap(), input);
    }

    #[test]
    fn test_create_voice_request() {
        assert!(CreateVoiceRequest::new("", "desc", "gen").is_err());
        assert!(CreateVoiceRequest::new("Name", "desc", " ").is_err());

        let request = CreateVoiceRequest::new("Narrator", "Deep voice", "gen-123")
            .unwrap()
            .with_label("use", "audiobook");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "voice_name": "Narrator",
                "voice_description": "Deep voice",
                "generated_voice_id": "gen-123",
                "labels": { "use": "audiobook" }
            })
        );
    }
}
