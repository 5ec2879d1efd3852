//! Synthesis history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::voice::VoiceSettings;
use super::{null_as_default, unix_to_utc};
use crate::error::ValidationError;

/// A record of a past synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub history_item_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub voice_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Creation time as seconds since the Unix epoch.
    pub date_unix: i64,
    pub character_count_change_from: i64,
    pub character_count_change_to: i64,
    /// MIME type of the stored audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Server-side state such as `created` or `deleted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<VoiceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Rating left on the item, `null` until someone rates it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<HistoryFeedback>,
}

/// User feedback attached to a history item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryFeedback {
    pub thumbs_up: bool,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub emotions: bool,
    #[serde(default)]
    pub inaccurate_clone: bool,
    #[serde(default)]
    pub glitches: bool,
    #[serde(default)]
    pub audio_quality: bool,
    #[serde(default)]
    pub other: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_status: Option<String>,
}

impl HistoryItem {
    /// The history item identifier.
    pub fn id(&self) -> &str {
        &self.history_item_id
    }

    /// Creation time, if `date_unix` is in range.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.date_unix)
    }

    /// Characters billed for this synthesis.
    pub fn character_count(&self) -> i64 {
        self.character_count_change_to - self.character_count_change_from
    }
}

/// One page of `GET /history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<HistoryItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_history_item_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl HistoryPage {
    /// Query that fetches the page after this one, if there is one.
    pub fn next_query(&self, page_size: Option<u32>) -> Option<HistoryQuery> {
        if !self.has_more {
            return None;
        }
        let last = self.last_history_item_id.clone()?;
        Some(HistoryQuery {
            page_size,
            start_after_history_item_id: Some(last),
            voice_id: None,
        })
    }
}

/// Query parameters for `GET /history`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    /// Items per page (1..=1000, server default 100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_after_history_item_id: Option<String>,
    /// Restrict to one voice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

impl HistoryQuery {
    /// Validates the page size bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(size) = self.page_size {
            ValidationError::check_range("page_size", f64::from(size), 1.0, 1000.0)?;
        }
        Ok(())
    }
}

/// Body of `POST /history/download`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadHistoryRequest {
    history_item_ids: Vec<String>,
}

impl DownloadHistoryRequest {
    /// Requires at least one id.
    pub fn new<I, S>(ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let history_item_ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if history_item_ids.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "history_item_ids",
            });
        }
        Ok(Self { history_item_ids })
    }

    pub fn ids(&self) -> &[String] {
        &self.history_item_ids
    }
}
