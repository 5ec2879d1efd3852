//! Voice design: previews of generated voices and saving them.

use super::{ApiEndpoint, endpoint};
use crate::client::{NO_QUERY, header_str};
use crate::error::{Result, ValidationError};
use crate::types::{
    CreateVoiceRequest, GeneratedVoiceOptions, GeneratedVoiceRequest, OutputFormat, Voice,
    VoiceClip,
};

/// Response header naming the generated voice of a preview.
pub const GENERATED_VOICE_ID_HEADER: &str = "generated_voice_id";

/// Cache directory for voice previews.
pub const VOICE_GENERATION_DIR: &str = "VoiceGeneration";

endpoint!(
    /// Operations under `/voice-generation`.
    VoiceGenerationEndpoint,
    "voice-generation"
);

impl VoiceGenerationEndpoint {
    /// `GET /voice-generation/generate-voice/parameters`
    pub async fn get_voice_generation_options(&self) -> Result<GeneratedVoiceOptions> {
        self.context
            .get_json(&self.url("/generate-voice/parameters"), NO_QUERY)
            .await
    }

    /// Generates a preview of a new voice.
    ///
    /// Returns the `generated_voice_id` needed by [`Self::create_voice`] and
    /// the preview clip, cached at `{cache}/VoiceGeneration/{id}.mp3`. A
    /// stale file with the same name is replaced.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::MissingHeader`] if the server does not name
    /// the generated voice.
    pub async fn generate_voice_preview(
        &self,
        request: &GeneratedVoiceRequest,
    ) -> Result<(String, VoiceClip)> {
        let (headers, audio) = self
            .context
            .post_for_bytes(&self.url("/generate-voice"), NO_QUERY, request)
            .await?;

        let generated_voice_id = header_str(&headers, GENERATED_VOICE_ID_HEADER)
            .ok_or(ValidationError::MissingHeader(GENERATED_VOICE_ID_HEADER))?
            .to_string();

        let format = OutputFormat::default();
        let cache = self.context.cache();
        let path = cache.path_for(&[VOICE_GENERATION_DIR], &generated_voice_id, format.extension());
        cache.store(&path, &audio).await?;
        tracing::info!(
            generated_voice_id = %generated_voice_id,
            path = %path.display(),
            "Saved voice preview"
        );

        let clip = VoiceClip {
            id: generated_voice_id.clone(),
            text: Some(request.text().to_string()),
            voice_id: generated_voice_id.clone(),
            voice_name: None,
            format,
            audio,
            cached_path: Some(path),
        };
        Ok((generated_voice_id, clip))
    }

    /// Saves a previewed voice to the account.
    ///
    /// `POST /voice-generation/create-voice`
    pub async fn create_voice(&self, request: &CreateVoiceRequest) -> Result<Voice> {
        self.context
            .post_json(&self.url("/create-voice"), request)
            .await
    }
}
