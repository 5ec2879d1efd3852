//! Dubbing project requests and responses.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::null_as_default;
use super::upload::MediaUpload;
use crate::error::ValidationError;

/// A source media file for a dubbing project.
///
/// Same validation as every upload: non-empty readable data, a non-blank
/// name and a `type/subtype` media type.
pub type DubbingStream = MediaUpload;

/// Multipart request for `POST /dubbing`.
///
/// Either source files or a source URL, never both.
#[derive(Debug, Clone)]
pub struct DubbingRequest {
    files: Vec<DubbingStream>,
    source_url: Option<String>,
    target_language: String,
    source_language: Option<String>,
    number_of_speakers: Option<u32>,
    watermark: Option<bool>,
    start_time: Option<u32>,
    end_time: Option<u32>,
    highest_resolution: Option<bool>,
    drop_background_audio: Option<bool>,
    use_profanity_filter: Option<bool>,
    project_name: Option<String>,
}

impl DubbingRequest {
    /// Dubs uploaded media into `target_language`.
    ///
    /// ## Errors
    ///
    /// [`ValidationError::ConflictingSources`] if `files` is empty, and
    /// [`ValidationError::EmptyField`] for a blank target language.
    pub fn from_files(
        files: Vec<DubbingStream>,
        target_language: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if files.is_empty() {
            return Err(ValidationError::ConflictingSources {
                first: "files",
                second: "source_url",
            });
        }
        Self::build(files, None, target_language.into())
    }

    /// Dubs media fetched by the server from `source_url`.
    pub fn from_url(
        source_url: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(ValidationError::ConflictingSources {
                first: "files",
                second: "source_url",
            });
        }
        url::Url::parse(&source_url).map_err(|source| ValidationError::InvalidUrl {
            field: "source_url",
            source,
        })?;
        Self::build(Vec::new(), Some(source_url), target_language.into())
    }

    fn build(
        files: Vec<DubbingStream>,
        source_url: Option<String>,
        target_language: String,
    ) -> Result<Self, ValidationError> {
        if target_language.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "target_language",
            });
        }
        Ok(Self {
            files,
            source_url,
            target_language,
            source_language: None,
            number_of_speakers: None,
            watermark: None,
            start_time: None,
            end_time: None,
            highest_resolution: None,
            drop_background_audio: None,
            use_profanity_filter: None,
            project_name: None,
        })
    }

    /// Source language, or auto-detect when unset.
    #[must_use]
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = Some(language.into());
        self
    }

    /// Number of speakers, `0` to auto-detect.
    #[must_use]
    pub fn with_number_of_speakers(mut self, speakers: u32) -> Self {
        self.number_of_speakers = Some(speakers);
        self
    }

    #[must_use]
    pub fn with_watermark(mut self, watermark: bool) -> Self {
        self.watermark = Some(watermark);
        self
    }

    /// Restricts dubbing to `start..end` seconds of the source.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] unless `start < end`.
    pub fn with_time_range(mut self, start: u32, end: u32) -> Result<Self, ValidationError> {
        if start >= end {
            return Err(ValidationError::OutOfRange {
                field: "start_time",
                value: f64::from(start),
                min: 0.0,
                max: f64::from(end.saturating_sub(1)),
            });
        }
        self.start_time = Some(start);
        self.end_time = Some(end);
        Ok(self)
    }

    #[must_use]
    pub fn with_highest_resolution(mut self, highest: bool) -> Self {
        self.highest_resolution = Some(highest);
        self
    }

    #[must_use]
    pub fn with_drop_background_audio(mut self, drop: bool) -> Self {
        self.drop_background_audio = Some(drop);
        self
    }

    #[must_use]
    pub fn with_profanity_filter(mut self, filter: bool) -> Self {
        self.use_profanity_filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn files(&self) -> &[DubbingStream] {
        &self.files
    }

    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Text fields of the multipart form, unset options omitted.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("target_lang", self.target_language.clone())];
        let optional = [
            ("source_url", self.source_url.clone()),
            ("source_lang", self.source_language.clone()),
            ("num_speakers", self.number_of_speakers.map(|n| n.to_string())),
            ("watermark", self.watermark.map(|b| b.to_string())),
            ("start_time", self.start_time.map(|n| n.to_string())),
            ("end_time", self.end_time.map(|n| n.to_string())),
            ("highest_resolution", self.highest_resolution.map(|b| b.to_string())),
            ("drop_background_audio", self.drop_background_audio.map(|b| b.to_string())),
            ("use_profanity_filter", self.use_profanity_filter.map(|b| b.to_string())),
            ("name", self.project_name.clone()),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v))),
        );
        fields
    }
}

/// Body returned by `POST /dubbing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DubbingResponse {
    pub dubbing_id: String,
    pub expected_duration_sec: f64,
}

impl DubbingResponse {
    /// The dubbing project identifier.
    pub fn id(&self) -> &str {
        &self.dubbing_id
    }
}

/// Processing state of a dubbing project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DubbingStatus {
    Dubbing,
    Dubbed,
    Failed,
    /// A state this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl DubbingStatus {
    /// Whether polling can stop.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dubbed | Self::Failed)
    }
}

/// Body of `GET /dubbing/{dubbing_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DubbingProjectMetadata {
    pub dubbing_id: String,
    #[serde(default)]
    pub name: String,
    pub status: DubbingStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Subtitle format for dubbing transcripts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TranscriptFormat {
    #[default]
    Srt,
    Webvtt,
}
