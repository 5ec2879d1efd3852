//! Typed async client for the ElevenLabs web API.
//!
//! Covers voices, text-to-speech (complete and streamed), history, models,
//! sound effects, voice design, dubbing and account information. Synthesized
//! audio is cached on disk and can be copied into a project asset tree with
//! [`import::import_clips`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use elevenlabs_lib::ElevenLabsClient;
//! use elevenlabs_lib::types::{TextToSpeechRequest, Model, Voice};
//!
//! # async fn run() -> elevenlabs_lib::error::Result<()> {
//! let client = ElevenLabsClient::from_env()?;
//!
//! let voice = Voice::new("21m00Tcm4TlvDq8ikWAM", "Rachel");
//! let request = TextToSpeechRequest::new("The quick brown fox")?
//!     .with_model(Model::multilingual_v2().id());
//!
//! let clip = client.text_to_speech().text_to_speech(&voice, &request).await?;
//! println!("cached at {:?}", clip.cached_path);
//! # Ok(())
//! # }
//! ```
//!
//! ## Credentials
//!
//! The API key is taken from, in order: an explicit key, the `api_key` of a
//! config file (see [`config`]), then `ELEVEN_LABS_API_KEY` or
//! `ELEVENLABS_API_KEY`.

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod import;
pub mod types;

pub use client::{ClientContext, ElevenLabsClient};
pub use config::{ElevenLabsConfig, ElevenLabsSettings};
pub use endpoints::ApiEndpoint;
pub use error::{ElevenLabsError, Result};
