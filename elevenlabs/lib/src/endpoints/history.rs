//! Synthesis history.

use bytes::Bytes;

use super::{ApiEndpoint, endpoint};
use crate::client::NO_QUERY;
use crate::error::Result;
use crate::types::{
    DownloadHistoryRequest, HistoryItem, HistoryPage, HistoryQuery, OutputFormat,
    StatusResponse, VoiceClip,
};

/// Cache directory for downloaded history audio.
pub const HISTORY_DIR: &str = "History";

endpoint!(
    /// Operations under `/history`.
    HistoryEndpoint,
    "history"
);

impl HistoryEndpoint {
    /// `GET /history`, one page at a time.
    ///
    /// Use [`HistoryPage::next_query`] to walk further pages.
    ///
    /// ## Errors
    ///
    /// Returns [`crate::error::ValidationError::OutOfRange`] for a page size
    /// outside `1..=1000` without sending anything.
    pub async fn get_history(&self, query: &HistoryQuery) -> Result<HistoryPage> {
        query.validate()?;
        self.context.get_json(&self.url(""), query).await
    }

    /// `GET /history/{history_item_id}`
    pub async fn get_history_item(&self, history_item_id: &str) -> Result<HistoryItem> {
        self.context
            .get_json(&self.url(&format!("/{history_item_id}")), NO_QUERY)
            .await
    }

    /// Downloads an item's audio into `{cache}/History/`.
    pub async fn get_history_audio(&self, item: &HistoryItem) -> Result<VoiceClip> {
        let url = self.url(&format!("/{}/audio", item.id()));
        let (_, audio) = self.context.get_bytes(&url, NO_QUERY).await?;

        let format = OutputFormat::default();
        let cache = self.context.cache();
        let path = cache.path_for(&[HISTORY_DIR], item.id(), format.extension());
        cache.store(&path, &audio).await?;

        Ok(VoiceClip {
            id: item.history_item_id.clone(),
            text: Some(item.text.clone()).filter(|t| !t.is_empty()),
            voice_id: item.voice_id.clone(),
            voice_name: item.voice_name.clone(),
            format,
            audio,
            cached_path: Some(path),
        })
    }

    /// `DELETE /history/{history_item_id}`
    pub async fn delete_history_item(&self, history_item_id: &str) -> Result<StatusResponse> {
        self.context
            .delete_json(&self.url(&format!("/{history_item_id}")))
            .await
    }

    /// `POST /history/download`
    ///
    /// A single id returns that item's audio. Several ids return a zip
    /// archive. The bytes are handed back as-is.
    pub async fn download_history_items(&self, request: &DownloadHistoryRequest) -> Result<Bytes> {
        let (_, body) = self
            .context
            .post_for_bytes(&self.url("/download"), NO_QUERY, request)
            .await?;
        tracing::debug!(items = request.ids().len(), bytes = body.len(), "Downloaded history items");
        Ok(body)
    }
}
