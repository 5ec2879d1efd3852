//! Integration tests for the audio-producing endpoints and the cache.

mod common;

use std::time::Duration;

use common::Harness;
use elevenlabs_lib::error::{ClientError, ElevenLabsError, ValidationError};
use elevenlabs_lib::types::{
    Accent, Age, CreateVoiceRequest, DubbingRequest, DubbingStatus, DubbingStream, Gender,
    GeneratedVoiceRequest, OutputFormat, SoundGenerationRequest, TextToSpeechRequest,
    TranscriptFormat, Voice,
};
use futures::StreamExt;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header_regex, method, path, query_param,
};
use wiremock::{Mock, ResponseTemplate};

const AUDIO: &[u8] = b"ID3\x04\x00fake-mp3-frames-0123456789";

fn rachel() -> Voice {
    Voice::new("21m00Tcm4TlvDq8ikWAM", "Rachel")
}

#[tokio::test]
async fn test_text_to_speech_uses_history_item_id() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .and(query_param("output_format", "mp3_44100_128"))
        .and(body_json(json!({ "text": "Hello world", "model_id": "eleven_multilingual_v2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("history-item-id", "hist_123")
                .set_body_bytes(AUDIO.to_vec()),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let request = TextToSpeechRequest::new("Hello world")
        .unwrap()
        .with_model("eleven_multilingual_v2");
    let clip = h
        .client
        .text_to_speech()
        .text_to_speech(&rachel(), &request)
        .await
        .unwrap();

    assert_eq!(clip.id, "hist_123");
    assert_eq!(clip.text.as_deref(), Some("Hello world"));
    assert_eq!(clip.voice_label(), "Rachel");
    let expected = h
        .cache
        .path()
        .join("21m00Tcm4TlvDq8ikWAM")
        .join("hist_123.mp3");
    assert_eq!(clip.cached_path.as_deref(), Some(expected.as_path()));
    assert_eq!(std::fs::read(expected).unwrap(), AUDIO);
}

#[tokio::test]
async fn test_text_to_speech_without_header_uses_request_hash() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM"))
        .and(query_param("output_format", "pcm_16000"))
        .and(query_param("optimize_streaming_latency", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO.to_vec()))
        .mount(&h.server)
        .await;

    let request = TextToSpeechRequest::new("No header here")
        .unwrap()
        .with_output_format(OutputFormat::Pcm16000)
        .with_optimize_streaming_latency(2)
        .unwrap();
    let clip = h
        .client
        .text_to_speech()
        .text_to_speech(&rachel(), &request)
        .await
        .unwrap();

    assert_eq!(clip.id, request.cache_key(rachel().id()).generate_hash());
    assert_eq!(clip.format, OutputFormat::Pcm16000);
    assert!(
        clip.cached_path
            .unwrap()
            .to_string_lossy()
            .ends_with(".pcm")
    );
}

#[tokio::test]
async fn test_stream_yields_all_bytes_in_order_and_finishes() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM/stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("history-item-id", "hist_stream")
                .set_body_bytes(AUDIO.to_vec()),
        )
        .mount(&h.server)
        .await;

    let request = TextToSpeechRequest::new("Streaming please").unwrap();
    let mut stream = h
        .client
        .text_to_speech()
        .stream_text_to_speech(&rachel(), &request)
        .await
        .unwrap();
    assert_eq!(stream.id(), "hist_stream");

    let first = stream.next().await.unwrap().unwrap();
    assert!(!first.is_empty());
    assert!(AUDIO.starts_with(&first));

    let clip = stream.finish().await.unwrap();
    assert_eq!(clip.audio.as_ref(), AUDIO);
    assert_eq!(clip.id, "hist_stream");
    assert_eq!(
        std::fs::read(clip.cached_path.unwrap()).unwrap(),
        AUDIO
    );
}

#[tokio::test]
async fn test_stream_collects_in_arrival_order() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/21m00Tcm4TlvDq8ikWAM/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO.to_vec()))
        .mount(&h.server)
        .await;

    let request = TextToSpeechRequest::new("Order matters").unwrap();
    let stream = h
        .client
        .text_to_speech()
        .stream_text_to_speech(&rachel(), &request)
        .await
        .unwrap();

    let chunks: Vec<_> = stream.collect().await;
    let joined: Vec<u8> = chunks
        .into_iter()
        .flat_map(|c| c.unwrap().to_vec())
        .collect();
    assert_eq!(joined, AUDIO);
}

#[tokio::test]
async fn test_stream_error_status_fails_before_streaming() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/missing/stream"))
        .respond_with(ResponseTemplate::new(404).set_body_string("voice_not_found"))
        .mount(&h.server)
        .await;

    let request = TextToSpeechRequest::new("Hello").unwrap();
    let err = h
        .client
        .text_to_speech()
        .stream_text_to_speech(&Voice::new("missing", ""), &request)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

fn preview_request() -> GeneratedVoiceRequest {
    GeneratedVoiceRequest::new(
        "A".repeat(120),
        Gender::Female,
        Accent::british(),
        Age::Young,
        1.2,
    )
    .unwrap()
}

#[tokio::test]
async fn test_voice_preview_overwrites_stale_file() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/voice-generation/generate-voice"))
        .and(body_string_contains(r#""gender":"female""#))
        .and(body_string_contains(r#""age":"young""#))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("generated_voice_id", "gen_abc")
                .set_body_bytes(AUDIO.to_vec()),
        )
        .mount(&h.server)
        .await;

    let stale = h.cache.path().join("VoiceGeneration").join("gen_abc.mp3");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, b"old preview").unwrap();

    let (id, clip) = h
        .client
        .voice_generation()
        .generate_voice_preview(&preview_request())
        .await
        .unwrap();

    assert_eq!(id, "gen_abc");
    assert_eq!(clip.cached_path.as_deref(), Some(stale.as_path()));
    assert_eq!(std::fs::read(&stale).unwrap(), AUDIO);
}

#[tokio::test]
async fn test_voice_preview_requires_generated_voice_id() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/voice-generation/generate-voice"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO.to_vec()))
        .mount(&h.server)
        .await;

    let err = h
        .client
        .voice_generation()
        .generate_voice_preview(&preview_request())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ElevenLabsError::Validation(ValidationError::MissingHeader("generated_voice_id"))
    ));
}

#[tokio::test]
async fn test_voice_generation_options_and_create() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/voice-generation/generate-voice/parameters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genders": [{ "name": "Female", "code": "female" }],
            "accents": [{ "name": "British", "code": "british" }],
            "ages": [{ "name": "Young", "code": "young" }],
            "minimum_characters": 100,
            "maximum_characters": 1000,
            "minimum_accent_strength": 0.3,
            "maximum_accent_strength": 2.0
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/voice-generation/create-voice"))
        .and(body_json(json!({
            "voice_name": "Narrator",
            "voice_description": "Warm and calm",
            "generated_voice_id": "gen_abc"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "voice_id": "saved_voice",
            "name": "Narrator"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let generation = h.client.voice_generation();
    let options = generation.get_voice_generation_options().await.unwrap();
    assert_eq!(options.accents[0].code, "british");
    assert_eq!(options.maximum_characters, 1000);

    let request = CreateVoiceRequest::new("Narrator", "Warm and calm", "gen_abc").unwrap();
    let voice = generation.create_voice(&request).await.unwrap();
    assert_eq!(voice.id(), "saved_voice");
}

#[tokio::test]
async fn test_generate_sound_posts_only_set_fields() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/sound-generation"))
        .and(body_json(json!({ "text": "thunder rolling", "duration_seconds": 4.0 })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(AUDIO.to_vec()))
        .expect(1)
        .mount(&h.server)
        .await;

    let request = SoundGenerationRequest::new("thunder rolling", Some(4.0), None).unwrap();
    let clip = h
        .client
        .sound_generation()
        .generate_sound(&request)
        .await
        .unwrap();

    let cached = clip.cached_path.unwrap();
    assert_eq!(cached.parent().unwrap(), h.cache.path().join("SoundGeneration"));
    assert_eq!(std::fs::read(cached).unwrap(), AUDIO);
}

#[tokio::test]
async fn test_dub_sends_multipart_form() {
    let h = Harness::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/dubbing"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("target_lang"))
        .and(body_string_contains("trailer.mp4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dubbing_id": "dub_1",
            "expected_duration_sec": 42.0
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let source = DubbingStream::from_bytes(b"\x00\x00\x00\x18ftypmp42".to_vec(), "trailer.mp4", "video/mp4").unwrap();
    let request = DubbingRequest::from_files(vec![source], "es").unwrap();
    let response = h.client.dubbing().dub(&request).await.unwrap();
    assert_eq!(response.id(), "dub_1");
}

#[tokio::test]
async fn test_wait_for_dubbing_completion() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dubbing/dub_done"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dubbing_id": "dub_done",
            "name": "Trailer",
            "status": "dubbed",
            "target_languages": ["es"]
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dubbing/dub_slow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dubbing_id": "dub_slow",
            "name": "Trailer",
            "status": "dubbing",
            "target_languages": ["es"]
        })))
        .expect(3)
        .mount(&h.server)
        .await;

    let dubbing = h.client.dubbing();
    let done = dubbing
        .wait_for_dubbing_completion("dub_done", Duration::from_millis(5), 3)
        .await
        .unwrap();
    assert_eq!(done.status, DubbingStatus::Dubbed);

    let err = dubbing
        .wait_for_dubbing_completion("dub_slow", Duration::from_millis(5), 3)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ElevenLabsError::Client(ClientError::Timeout { duration_ms: 10 })
    ));
}

#[tokio::test]
async fn test_dubbed_file_transcript_and_delete() {
    let h = Harness::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/dubbing/dub_1/audio/es"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(AUDIO.to_vec()),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dubbing/dub_1/transcript/es"))
        .and(query_param("format_type", "webvtt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("WEBVTT\n\n00:00.000 --> 00:01.000\nHola"))
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dubbing/dub_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let dubbing = h.client.dubbing();
    let path = dubbing.get_dubbed_file("dub_1", "es").await.unwrap();
    assert_eq!(path, h.cache.path().join("Dubbing").join("dub_1").join("es.mp3"));
    assert_eq!(std::fs::read(&path).unwrap(), AUDIO);

    let transcript = dubbing
        .get_transcript_for_dub("dub_1", "es", TranscriptFormat::Webvtt)
        .await
        .unwrap();
    assert!(transcript.starts_with("WEBVTT"));

    assert!(dubbing.delete_dubbing_project("dub_1").await.unwrap().is_ok());
}
