//! Dubbing projects.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;

use super::{ApiEndpoint, endpoint};
use crate::client::{NO_QUERY, header_str};
use crate::error::{ClientError, Result};
use crate::types::{
    DubbingProjectMetadata, DubbingRequest, DubbingResponse, StatusResponse, TranscriptFormat,
};

/// Cache directory for dubbed media.
pub const DUBBING_DIR: &str = "Dubbing";

endpoint!(
    /// Operations under `/dubbing`.
    DubbingEndpoint,
    "dubbing"
);

impl DubbingEndpoint {
    /// Starts a dubbing project.
    ///
    /// `POST /dubbing` as `multipart/form-data`. Dubbing runs in the
    /// background; poll with [`Self::wait_for_dubbing_completion`].
    pub async fn dub(&self, request: &DubbingRequest) -> Result<DubbingResponse> {
        let mut form = Form::new();
        for (key, value) in request.form_fields() {
            form = form.text(key, value);
        }
        for file in request.files() {
            form = form.part("file", file.to_part().map_err(ClientError::from)?);
        }

        let response: DubbingResponse = self.context.post_multipart(&self.url(""), form).await?;
        tracing::info!(
            dubbing_id = %response.dubbing_id,
            expected_duration_sec = response.expected_duration_sec,
            target_language = request.target_language(),
            "Started dubbing project"
        );
        Ok(response)
    }

    /// `GET /dubbing/{dubbing_id}`
    pub async fn get_dubbing_project_metadata(
        &self,
        dubbing_id: &str,
    ) -> Result<DubbingProjectMetadata> {
        self.context
            .get_json(&self.url(&format!("/{dubbing_id}")), NO_QUERY)
            .await
    }

    /// Polls a project every `interval` until it is dubbed or failed.
    ///
    /// The last metadata is returned in both cases; check its `status`.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::Timeout`] once `max_checks` polls have seen the
    /// project still in progress.
    pub async fn wait_for_dubbing_completion(
        &self,
        dubbing_id: &str,
        interval: Duration,
        max_checks: u32,
    ) -> Result<DubbingProjectMetadata> {
        for check in 1..=max_checks {
            let metadata = self.get_dubbing_project_metadata(dubbing_id).await?;
            if metadata.status.is_terminal() {
                return Ok(metadata);
            }
            tracing::debug!(dubbing_id, check, max_checks, status = %metadata.status, "Dubbing in progress");
            if check < max_checks {
                tokio::time::sleep(interval).await;
            }
        }

        let waited = interval.saturating_mul(max_checks.saturating_sub(1));
        tracing::warn!(dubbing_id, max_checks, "Gave up waiting for dubbing");
        Err(ClientError::Timeout {
            duration_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
        }
        .into())
    }

    /// Downloads the dubbed media for `language_code`.
    ///
    /// Written to `{cache}/Dubbing/{dubbing_id}/{language_code}.{ext}`, with
    /// the extension taken from the response content type.
    pub async fn get_dubbed_file(&self, dubbing_id: &str, language_code: &str) -> Result<PathBuf> {
        let url = self.url(&format!("/{dubbing_id}/audio/{language_code}"));
        let (headers, data) = self.context.get_bytes(&url, NO_QUERY).await?;

        let extension = extension_for(header_str(&headers, CONTENT_TYPE.as_str()));
        let cache = self.context.cache();
        let path = cache.path_for(&[DUBBING_DIR, dubbing_id], language_code, extension);
        cache.store(&path, &data).await?;
        tracing::debug!(dubbing_id, language_code, path = %path.display(), "Cached dubbed file");
        Ok(path)
    }

    /// `GET /dubbing/{dubbing_id}/transcript/{language_code}`
    pub async fn get_transcript_for_dub(
        &self,
        dubbing_id: &str,
        language_code: &str,
        format: TranscriptFormat,
    ) -> Result<String> {
        let url = self.url(&format!("/{dubbing_id}/transcript/{language_code}"));
        let (_, body) = self
            .context
            .get_bytes(&url, &[("format_type", format.as_ref())])
            .await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// `DELETE /dubbing/{dubbing_id}`
    pub async fn delete_dubbing_project(&self, dubbing_id: &str) -> Result<StatusResponse> {
        self.context
            .delete_json(&self.url(&format!("/{dubbing_id}")))
            .await
    }
}

fn extension_for(content_type: Option<&str>) -> &'static str {
    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .unwrap_or_default();
    match essence {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" => "wav",
        "video/mp4" => "mp4",
        "video/webm" | "audio/webm" => "webm",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_content_types() {
        assert_eq!(extension_for(Some("audio/mpeg")), "mp3");
        assert_eq!(extension_for(Some("video/mp4; codecs=avc1")), "mp4");
        assert_eq!(extension_for(Some("application/octet-stream")), "bin");
        assert_eq!(extension_for(None), "bin");
    }
}
