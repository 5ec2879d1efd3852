//! Audio output formats and synthesized clips.

use std::path::PathBuf;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Audio encoding requested via the `output_format` query parameter.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
pub enum OutputFormat {
    #[serde(rename = "mp3_22050_32")]
    #[strum(serialize = "mp3_22050_32")]
    Mp3_22050_32,
    #[serde(rename = "mp3_44100_32")]
    #[strum(serialize = "mp3_44100_32")]
    Mp3_44100_32,
    #[serde(rename = "mp3_44100_64")]
    #[strum(serialize = "mp3_44100_64")]
    Mp3_44100_64,
    #[serde(rename = "mp3_44100_96")]
    #[strum(serialize = "mp3_44100_96")]
    Mp3_44100_96,
    /// MP3 at 44.1 kHz, 128 kbps.
    #[default]
    #[serde(rename = "mp3_44100_128")]
    #[strum(serialize = "mp3_44100_128")]
    Mp3_44100_128,
    /// MP3 at 44.1 kHz, 192 kbps. Requires a Creator tier or above.
    #[serde(rename = "mp3_44100_192")]
    #[strum(serialize = "mp3_44100_192")]
    Mp3_44100_192,
    #[serde(rename = "pcm_16000")]
    #[strum(serialize = "pcm_16000")]
    Pcm16000,
    #[serde(rename = "pcm_22050")]
    #[strum(serialize = "pcm_22050")]
    Pcm22050,
    #[serde(rename = "pcm_24000")]
    #[strum(serialize = "pcm_24000")]
    Pcm24000,
    /// Raw 16-bit PCM at 44.1 kHz. Requires a Pro tier or above.
    #[serde(rename = "pcm_44100")]
    #[strum(serialize = "pcm_44100")]
    Pcm44100,
    /// u-law at 8 kHz, for telephony.
    #[serde(rename = "ulaw_8000")]
    #[strum(serialize = "ulaw_8000")]
    Ulaw8000,
}

impl OutputFormat {
    /// File extension used for cached files.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pcm16000 | Self::Pcm22050 | Self::Pcm24000 | Self::Pcm44100 => "pcm",
            Self::Ulaw8000 => "ulaw",
            _ => "mp3",
        }
    }

    /// MIME type of the encoded audio.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pcm16000 | Self::Pcm22050 | Self::Pcm24000 | Self::Pcm44100 => "audio/pcm",
            Self::Ulaw8000 => "audio/basic",
            _ => "audio/mpeg",
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        match self {
            Self::Mp3_22050_32 | Self::Pcm22050 => 22_050,
            Self::Pcm16000 => 16_000,
            Self::Pcm24000 => 24_000,
            Self::Ulaw8000 => 8_000,
            _ => 44_100,
        }
    }
}

/// A synthesized (or downloaded) piece of audio.
///
/// Holds the encoded bytes and, once written, the cache path. Decoding is
/// left to the caller's audio stack.
#[derive(Clone)]
pub struct VoiceClip {
    /// History item id when the server returned one, otherwise a
    /// deterministic request hash.
    pub id: String,
    /// Source text. `None` for voice samples and other non-TTS audio.
    pub text: Option<String>,
    /// Voice that produced the audio.
    pub voice_id: String,
    /// Human-readable voice name, used for import directory names.
    pub voice_name: Option<String>,
    pub format: OutputFormat,
    pub audio: Bytes,
    /// Where the audio was written in the local cache.
    pub cached_path: Option<PathBuf>,
}

impl std::fmt::Debug for VoiceClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceClip")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("voice_id", &self.voice_id)
            .field("voice_name", &self.voice_name)
            .field("format", &self.format)
            .field("audio_len", &self.audio.len())
            .field("cached_path", &self.cached_path)
            .finish()
    }
}

impl VoiceClip {
    /// Name used to group this clip on disk: the voice name, or the id.
    pub fn voice_label(&self) -> &str {
        self.voice_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.voice_id)
    }

    /// Whether this clip has source text (synthesized speech rather than a sample).
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// File name used for the cached audio.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.id, self.format.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_is_mp3_128() {
        assert_eq!(OutputFormat::default().to_string(), "mp3_44100_128");
    }

    #[test]
    fn test_string_forms_agree_with_serde() {
        for format in OutputFormat::iter() {
            let serde_form = serde_json::to_value(format).unwrap();
            assert_eq!(serde_form.as_str(), Some(format.as_ref()));
            assert_eq!(OutputFormat::from_str(format.as_ref()).unwrap(), format);
        }
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Mp3_44100_192.extension(), "mp3");
        assert_eq!(OutputFormat::Pcm24000.extension(), "pcm");
        assert_eq!(OutputFormat::Pcm24000.sample_rate(), 24_000);
        assert_eq!(OutputFormat::Ulaw8000.mime_type(), "audio/basic");
    }

    #[test]
    fn test_voice_label_falls_back_to_id() {
        let clip = VoiceClip {
            id: "clip".into(),
            text: None,
            voice_id: "voice-id".into(),
            voice_name: Some("  ".into()),
            format: OutputFormat::default(),
            audio: Bytes::new(),
            cached_path: None,
        };
        assert_eq!(clip.voice_label(), "voice-id");
        assert!(!clip.has_text());
        assert_eq!(clip.file_name(), "clip.mp3");
    }
}
