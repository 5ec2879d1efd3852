//! Synthesis model descriptors.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A language supported by a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub language_id: String,
    pub name: String,
}

/// A synthesis model as returned by `GET /models`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_be_finetuned: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_do_text_to_speech: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_do_voice_conversion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_cost_factor: Option<f64>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub languages: Vec<Language>,
}

static MONO_V1: LazyLock<Model> =
    LazyLock::new(|| Model::from_id(Model::MONO_V1_ID, "Eleven English v1"));
static MULTILINGUAL_V1: LazyLock<Model> =
    LazyLock::new(|| Model::from_id(Model::MULTILINGUAL_V1_ID, "Eleven Multilingual v1"));
static MULTILINGUAL_V2: LazyLock<Model> =
    LazyLock::new(|| Model::from_id(Model::MULTILINGUAL_V2_ID, "Eleven Multilingual v2"));
static TURBO_V2: LazyLock<Model> =
    LazyLock::new(|| Model::from_id(Model::TURBO_V2_ID, "Eleven Turbo v2"));

impl Model {
    pub const MONO_V1_ID: &'static str = "eleven_monolingual_v1";
    pub const MULTILINGUAL_V1_ID: &'static str = "eleven_multilingual_v1";
    pub const MULTILINGUAL_V2_ID: &'static str = "eleven_multilingual_v2";
    pub const TURBO_V2_ID: &'static str = "eleven_turbo_v2";

    /// English-only v1 model.
    pub fn mono_v1() -> &'static Model {
        &MONO_V1
    }

    /// First multilingual model.
    pub fn multilingual_v1() -> &'static Model {
        &MULTILINGUAL_V1
    }

    pub fn multilingual_v2() -> &'static Model {
        &MULTILINGUAL_V2
    }

    /// Low-latency English model.
    pub fn turbo_v2() -> &'static Model {
        &TURBO_V2
    }

    /// Creates a minimal descriptor for a known model id.
    pub fn from_id(model_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            name: Some(name.into()),
            description: None,
            can_be_finetuned: None,
            can_do_text_to_speech: Some(true),
            can_do_voice_conversion: None,
            token_cost_factor: None,
            languages: Vec::new(),
        }
    }

    /// The model identifier sent in request bodies.
    pub fn id(&self) -> &str {
        &self.model_id
    }
}
