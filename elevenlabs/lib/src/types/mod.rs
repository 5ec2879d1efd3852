//! Request and response DTOs.
//!
//! Response types mirror the JSON returned by the API (snake_case on the
//! wire). Optional fields are skipped on serialization, so a deserialized
//! value re-serializes to the same JSON shape.
//!
//! Request types that carry constraints validate them in their constructors
//! and keep their fields private so the checks cannot be bypassed.

mod audio;
mod dubbing;
mod history;
mod model;
mod sound_generation;
mod text_to_speech;
mod upload;
mod user;
mod voice;
mod voice_generation;

pub use audio::{OutputFormat, VoiceClip};
pub use dubbing::{
    DubbingProjectMetadata, DubbingRequest, DubbingResponse, DubbingStatus, DubbingStream,
    TranscriptFormat,
};
pub use history::{
    DownloadHistoryRequest, HistoryFeedback, HistoryItem, HistoryPage, HistoryQuery,
};
pub use model::{Language, Model};
pub use sound_generation::SoundGenerationRequest;
pub use text_to_speech::TextToSpeechRequest;
pub use upload::MediaUpload;
pub use user::{AvailableModel, NextInvoice, SubscriptionInfo, SupportedLanguage, UserInfo};
pub use voice::{
    AddVoiceRequest, AddVoiceResponse, EditVoiceRequest, Sample, StatusResponse, Voice,
    VoiceList, VoiceSettings,
};
pub use voice_generation::{
    Accent, Age, CreateVoiceRequest, Gender, GeneratedVoiceOptions, GeneratedVoiceRequest,
    VoiceOption,
};

/// Deserializes `null` as the type's default.
///
/// The API sends `null` for several list and map fields.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Converts a Unix timestamp in seconds to a UTC date-time.
pub(crate) fn unix_to_utc(secs: i64) -> Option<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(secs, 0)
}
