//! Sound effect generation.

use super::{ApiEndpoint, endpoint};
use crate::cache::CacheKey;
use crate::client::NO_QUERY;
use crate::error::Result;
use crate::types::{OutputFormat, SoundGenerationRequest, VoiceClip};

/// Cache directory, and clip voice id, for generated sound effects.
pub const SOUND_GENERATION_DIR: &str = "SoundGeneration";

endpoint!(
    /// Operations under `/sound-generation`.
    SoundGenerationEndpoint,
    "sound-generation"
);

impl SoundGenerationEndpoint {
    /// Generates a sound effect and caches it in `{cache}/SoundGeneration/`.
    ///
    /// Sound effects have no history item, so the clip id is a hash of the
    /// prompt and its parameters.
    pub async fn generate_sound(&self, request: &SoundGenerationRequest) -> Result<VoiceClip> {
        let (_, audio) = self
            .context
            .post_for_bytes(&self.url(""), NO_QUERY, request)
            .await?;

        let format = OutputFormat::default();
        let id = CacheKey::new(
            SOUND_GENERATION_DIR,
            "",
            request.text(),
            format.as_ref(),
        )
        .with_settings(format!(
            "{:?}:{:?}",
            request.duration_seconds(),
            request.prompt_influence()
        ))
        .generate_hash();

        let cache = self.context.cache();
        let path = cache.path_for(&[SOUND_GENERATION_DIR], &id, format.extension());
        cache.store(&path, &audio).await?;
        tracing::debug!(clip_id = %id, path = %path.display(), "Cached sound effect");

        Ok(VoiceClip {
            id,
            text: Some(request.text().to_string()),
            voice_id: SOUND_GENERATION_DIR.to_string(),
            voice_name: None,
            format,
            audio,
            cached_path: Some(path),
        })
    }
}
