//! Voice, voice settings and voice sample types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::upload::MediaUpload;
use crate::error::ValidationError;

/// Tuning parameters for a voice.
///
/// `stability` and `similarity_boost` are expected in `0.0..=1.0`. The range
/// is enforced by the API, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Lower values are more expressive, higher values more consistent.
    pub stability: f64,
    /// How closely to adhere to the original voice.
    pub similarity_boost: f64,
    /// Style exaggeration (v2 models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<f64>,
    /// Speaker boost toggle (v2 models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_speaker_boost: Option<bool>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self::new(0.5, 0.75)
    }
}

impl VoiceSettings {
    /// Creates settings with the two core parameters.
    pub fn new(stability: f64, similarity_boost: f64) -> Self {
        Self {
            stability,
            similarity_boost,
            style: None,
            use_speaker_boost: None,
        }
    }
}

/// An audio sample attached to a cloned voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Sample {
    /// The sample identifier.
    pub fn id(&self) -> &str {
        &self.sample_id
    }
}

/// A named synthesis profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub voice_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub samples: Vec<Sample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<VoiceSettings>,
}

impl Voice {
    /// Creates a bare voice reference, e.g. for a known voice id.
    pub fn new(voice_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            voice_id: voice_id.into(),
            name: name.into(),
            samples: Vec::new(),
            category: None,
            labels: BTreeMap::new(),
            description: None,
            preview_url: None,
            settings: None,
        }
    }

    /// The voice identifier used in request paths.
    pub fn id(&self) -> &str {
        &self.voice_id
    }

    /// Looks up a sample by id.
    pub fn sample(&self, sample_id: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.sample_id == sample_id)
    }
}

/// Body of `GET /voices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub voices: Vec<Voice>,
}

/// `{"status": "ok"}` acknowledgement returned by mutating endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    /// Whether the server reported success.
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// Multipart request for `POST /voices/add` (instant voice cloning).
#[derive(Debug, Clone)]
pub struct AddVoiceRequest {
    name: String,
    description: Option<String>,
    labels: BTreeMap<String, String>,
    files: Vec<MediaUpload>,
}

impl AddVoiceRequest {
    /// Creates a request with a name and at least one sample file.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::EmptyField`] if the name is blank or no
    /// files are given.
    pub fn new(name: impl Into<String>, files: Vec<MediaUpload>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        if files.is_empty() {
            return Err(ValidationError::EmptyField { field: "files" });
        }
        Ok(Self {
            name,
            description: None,
            labels: BTreeMap::new(),
            files,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn files(&self) -> &[MediaUpload] {
        &self.files
    }
}

/// Multipart request for `POST /voices/{voice_id}/edit`.
#[derive(Debug, Clone)]
pub struct EditVoiceRequest {
    name: String,
    description: Option<String>,
    labels: BTreeMap<String, String>,
    files: Vec<MediaUpload>,
}

impl EditVoiceRequest {
    /// Starts an edit that renames the voice. Samples are optional.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" });
        }
        Ok(Self {
            name,
            description: None,
            labels: BTreeMap::new(),
            files: Vec::new(),
        })
    }

    /// Starts an edit from an existing voice, keeping its name and labels.
    pub fn from_voice(voice: &Voice) -> Result<Self, ValidationError> {
        let mut request = Self::new(voice.name.clone())?;
        request.description = voice.description.clone();
        request.labels = voice.labels.clone();
        Ok(request)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: MediaUpload) -> Self {
        self.files.push(file);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn files(&self) -> &[MediaUpload] {
        &self.files
    }
}

/// Body returned by `POST /voices/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddVoiceResponse {
    pub voice_id: String,
}
