//! Text-to-speech synthesis, complete and streamed.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use reqwest::Method;
use reqwest::header::HeaderMap;

use super::{ApiEndpoint, endpoint};
use crate::client::{ClientContext, header_str};
use crate::error::{ClientError, ElevenLabsError, Result};
use crate::types::{TextToSpeechRequest, Voice, VoiceClip};

/// Response header carrying the id of the history item a synthesis created.
pub const HISTORY_ITEM_ID_HEADER: &str = "history-item-id";

endpoint!(
    /// Operations under `/text-to-speech`.
    TextToSpeechEndpoint,
    "text-to-speech"
);

impl TextToSpeechEndpoint {
    /// Synthesizes `request` with `voice` and caches the audio.
    ///
    /// The clip id is the `history-item-id` response header when present,
    /// otherwise the request's deterministic cache hash. The audio lands in
    /// `{cache}/{voice_id}/{id}.{ext}`.
    ///
    /// ## Errors
    ///
    /// Returns [`ClientError::HttpStatus`] for a non-2xx answer and
    /// [`crate::error::CacheError`] if the audio cannot be written.
    pub async fn text_to_speech(
        &self,
        voice: &Voice,
        request: &TextToSpeechRequest,
    ) -> Result<VoiceClip> {
        let url = self.url(&format!("/{}", voice.id()));
        let (headers, audio) = self
            .context
            .post_for_bytes(&url, &request.query(), request)
            .await?;

        let id = clip_id(&headers, request, voice.id());
        store_speech(&self.context, voice, request, id, audio).await
    }

    /// Starts a streamed synthesis.
    ///
    /// Chunks are yielded in the order the server sends them. Call
    /// [`SpeechStream::finish`] to drain the rest and get the cached clip.
    ///
    /// ## Examples
    ///
    /// ```rust,no_run
    /// use futures::StreamExt;
    /// use elevenlabs_lib::ElevenLabsClient;
    /// use elevenlabs_lib::types::{TextToSpeechRequest, Voice};
    ///
    /// # async fn run(client: ElevenLabsClient) -> elevenlabs_lib::error::Result<()> {
    /// let voice = Voice::new("21m00Tcm4TlvDq8ikWAM", "Rachel");
    /// let request = TextToSpeechRequest::new("Hello there")?;
    /// let mut stream = client.text_to_speech().stream_text_to_speech(&voice, &request).await?;
    /// while let Some(chunk) = stream.next().await {
    ///     let chunk = chunk?;
    ///     println!("{} bytes", chunk.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn stream_text_to_speech(
        &self,
        voice: &Voice,
        request: &TextToSpeechRequest,
    ) -> Result<SpeechStream> {
        let url = self.url(&format!("/{}/stream", voice.id()));
        let query = request.query();
        let response = self
            .context
            .send(Method::POST, &url, |r| r.query(&query).json(request))
            .await?;

        let id = clip_id(response.headers(), request, voice.id());
        tracing::debug!(clip_id = %id, voice_id = voice.id(), "Opened speech stream");

        let chunks = response.bytes_stream().map(|chunk| chunk.map_err(ClientError::from));
        Ok(SpeechStream::new(
            Box::pin(chunks),
            Arc::clone(&self.context),
            voice.clone(),
            request.clone(),
            id,
        ))
    }
}

fn clip_id(headers: &HeaderMap, request: &TextToSpeechRequest, voice_id: &str) -> String {
    header_str(headers, HISTORY_ITEM_ID_HEADER)
        .map(str::to_string)
        .unwrap_or_else(|| request.cache_key(voice_id).generate_hash())
}

async fn store_speech(
    context: &ClientContext,
    voice: &Voice,
    request: &TextToSpeechRequest,
    id: String,
    audio: Bytes,
) -> Result<VoiceClip> {
    let format = request.output_format();
    let cache = context.cache();
    let path = cache.path_for(&[voice.id()], &id, format.extension());
    cache.store(&path, &audio).await?;
    tracing::debug!(clip_id = %id, bytes = audio.len(), path = %path.display(), "Cached speech");

    Ok(VoiceClip {
        id,
        text: Some(request.text().to_string()),
        voice_id: voice.voice_id.clone(),
        voice_name: Some(voice.name.clone()).filter(|n| !n.is_empty()),
        format,
        audio,
        cached_path: Some(path),
    })
}

type ChunkStream = Pin<Box<dyn Stream<Item = std::result::Result<Bytes, ClientError>> + Send>>;

/// Audio chunks of a streamed synthesis.
///
/// Finite and not restartable. Chunks already yielded stay valid if a later
/// chunk fails or the stream is dropped early.
pub struct SpeechStream {
    chunks: ChunkStream,
    context: Arc<ClientContext>,
    voice: Voice,
    request: TextToSpeechRequest,
    id: String,
    received: BytesMut,
    exhausted: bool,
}

impl std::fmt::Debug for SpeechStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechStream")
            .field("id", &self.id)
            .field("voice_id", &self.voice.voice_id)
            .field("received", &self.received.len())
            .field("exhausted", &self.exhausted)
            .finish()
    }
}

impl SpeechStream {
    pub(crate) fn new(
        chunks: ChunkStream,
        context: Arc<ClientContext>,
        voice: Voice,
        request: TextToSpeechRequest,
        id: String,
    ) -> Self {
        Self {
            chunks,
            context,
            voice,
            request,
            id,
            received: BytesMut::new(),
            exhausted: false,
        }
    }

    /// Id the finished clip will carry.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Bytes received so far.
    pub fn received_len(&self) -> usize {
        self.received.len()
    }

    /// Drains the remaining chunks, caches the full audio and returns it.
    ///
    /// ## Errors
    ///
    /// Fails on the first chunk error. Nothing is cached in that case.
    pub async fn finish(mut self) -> Result<VoiceClip> {
        while let Some(chunk) = self.next().await {
            chunk?;
        }
        let audio = self.received.split().freeze();
        store_speech(&self.context, &self.voice, &self.request, self.id, audio).await
    }
}

impl Stream for SpeechStream {
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.exhausted {
            return Poll::Ready(None);
        }
        match this.chunks.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.received.extend_from_slice(&chunk);
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(err))) => {
                this.exhausted = true;
                tracing::warn!(clip_id = %this.id, error = %err, "Speech stream failed");
                Poll::Ready(Some(Err(ElevenLabsError::from(err))))
            }
            Poll::Ready(None) => {
                this.exhausted = true;
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
