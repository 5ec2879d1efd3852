//! Voice management.

use std::collections::BTreeMap;

use reqwest::multipart::Form;

use super::{ApiEndpoint, endpoint};
use crate::cache::SAMPLES_DIR;
use crate::client::NO_QUERY;
use crate::error::{ClientError, Result, ValidationError};
use crate::types::{
    AddVoiceRequest, AddVoiceResponse, EditVoiceRequest, MediaUpload, OutputFormat, Sample,
    StatusResponse, Voice, VoiceClip, VoiceList, VoiceSettings,
};

endpoint!(
    /// Operations under `/voices`.
    VoicesEndpoint,
    "voices"
);

impl VoicesEndpoint {
    /// `GET /voices`
    pub async fn get_all_voices(&self) -> Result<Vec<Voice>> {
        let list: VoiceList = self.context.get_json(&self.url(""), NO_QUERY).await?;
        Ok(list.voices)
    }

    /// `GET /voices/{voice_id}`, optionally including the voice's settings.
    pub async fn get_voice(&self, voice_id: &str, with_settings: bool) -> Result<Voice> {
        self.context
            .get_json(
                &self.url(&format!("/{voice_id}")),
                &[("with_settings", with_settings)],
            )
            .await
    }

    /// `GET /voices/settings/default`
    pub async fn get_default_voice_settings(&self) -> Result<VoiceSettings> {
        self.context
            .get_json(&self.url("/settings/default"), NO_QUERY)
            .await
    }

    /// `GET /voices/{voice_id}/settings`
    pub async fn get_voice_settings(&self, voice_id: &str) -> Result<VoiceSettings> {
        self.context
            .get_json(&self.url(&format!("/{voice_id}/settings")), NO_QUERY)
            .await
    }

    /// `POST /voices/{voice_id}/settings/edit`
    pub async fn edit_voice_settings(
        &self,
        voice_id: &str,
        settings: &VoiceSettings,
    ) -> Result<StatusResponse> {
        self.context
            .post_json(&self.url(&format!("/{voice_id}/settings/edit")), settings)
            .await
    }

    /// Clones a voice from the request's samples.
    ///
    /// `POST /voices/add` as `multipart/form-data`.
    pub async fn add_voice(&self, request: &AddVoiceRequest) -> Result<AddVoiceResponse> {
        let form = voice_form(
            request.name(),
            request.description(),
            request.labels(),
            request.files(),
        )?;
        let response: AddVoiceResponse = self.context.post_multipart(&self.url("/add"), form).await?;
        tracing::info!(voice_id = %response.voice_id, name = request.name(), "Added voice");
        Ok(response)
    }

    /// Updates a voice's name, description, labels and adds samples.
    ///
    /// `POST /voices/{voice_id}/edit` as `multipart/form-data`.
    pub async fn edit_voice(
        &self,
        voice_id: &str,
        request: &EditVoiceRequest,
    ) -> Result<StatusResponse> {
        let form = voice_form(
            request.name(),
            request.description(),
            request.labels(),
            request.files(),
        )?;
        self.context
            .post_multipart(&self.url(&format!("/{voice_id}/edit")), form)
            .await
    }

    /// `DELETE /voices/{voice_id}`
    pub async fn delete_voice(&self, voice_id: &str) -> Result<StatusResponse> {
        self.context
            .delete_json(&self.url(&format!("/{voice_id}")))
            .await
    }

    /// Downloads a sample's audio into `{cache}/{voice_id}/Samples/`.
    ///
    /// The returned clip has no text, which makes the importer file it under
    /// the voice's `Samples` directory.
    pub async fn download_voice_sample_audio(
        &self,
        voice: &Voice,
        sample: &Sample,
    ) -> Result<VoiceClip> {
        let url = self.url(&format!("/{}/samples/{}/audio", voice.id(), sample.id()));
        let (_, audio) = self.context.get_bytes(&url, NO_QUERY).await?;

        let format = OutputFormat::default();
        let cache = self.context.cache();
        let path = cache.path_for(&[voice.id(), SAMPLES_DIR], sample.id(), format.extension());
        cache.store(&path, &audio).await?;
        tracing::debug!(path = %path.display(), "Cached voice sample");

        Ok(VoiceClip {
            id: sample.sample_id.clone(),
            text: None,
            voice_id: voice.voice_id.clone(),
            voice_name: Some(voice.name.clone()),
            format,
            audio,
            cached_path: Some(path),
        })
    }

    /// `DELETE /voices/{voice_id}/samples/{sample_id}`
    pub async fn delete_voice_sample(&self, voice_id: &str, sample_id: &str) -> Result<StatusResponse> {
        self.context
            .delete_json(&self.url(&format!("/{voice_id}/samples/{sample_id}")))
            .await
    }
}

/// Shared multipart layout for add and edit.
fn voice_form(
    name: &str,
    description: Option<&str>,
    labels: &BTreeMap<String, String>,
    files: &[MediaUpload],
) -> Result<Form> {
    let mut form = Form::new().text("name", name.to_string());
    if let Some(description) = description {
        form = form.text("description", description.to_string());
    }
    if !labels.is_empty() {
        let labels = serde_json::to_string(labels).map_err(ValidationError::from)?;
        form = form.text("labels", labels);
    }
    for file in files {
        form = form.part("files", file.to_part().map_err(ClientError::from)?);
    }
    Ok(form)
}
