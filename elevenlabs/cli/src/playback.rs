//! Bounded playback queue for streamed speech.
//!
//! A producer pulls chunks off the network stream and a writer task drains
//! them into the sink. The queue holds at most [`PLAYBACK_QUEUE_DEPTH`]
//! chunks, so a slow sink slows the download instead of buffering it all.

use bytes::Bytes;
use color_eyre::eyre::{Result, WrapErr, eyre};
use futures::{Stream, StreamExt};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

pub const PLAYBACK_QUEUE_DEPTH: usize = 32;

/// Copies `chunks` into `sink` in arrival order.
///
/// Returns the number of bytes written and the sink. A chunk error stops the
/// copy; bytes already written stay written.
pub async fn pump<S, E, W>(mut chunks: S, sink: W) -> Result<(u64, W)>
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::channel::<Bytes>(PLAYBACK_QUEUE_DEPTH);

    let writer = tokio::spawn(async move {
        let mut sink = sink;
        let mut written = 0u64;
        while let Some(chunk) = rx.recv().await {
            sink.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        sink.flush().await?;
        Ok::<_, std::io::Error>((written, sink))
    });

    let mut produced = Ok(());
    while let Some(chunk) = chunks.next().await {
        match chunk {
            Ok(chunk) => {
                if tx.send(chunk).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                produced = Err(err);
                break;
            }
        }
    }
    drop(tx);

    let (written, sink) = writer
        .await
        .map_err(|e| eyre!("playback writer panicked: {e}"))?
        .wrap_err("failed to write audio")?;
    produced.wrap_err("speech stream failed")?;

    tracing::debug!(written, "Playback queue drained");
    Ok((written, sink))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    #[tokio::test]
    async fn test_pump_preserves_order() {
        let chunks = (0..100u8)
            .map(|i| Ok::<_, std::io::Error>(Bytes::from(vec![i; 3])))
            .collect::<Vec<_>>();
        let (written, sink) = pump(stream::iter(chunks), Vec::new()).await.unwrap();

        assert_eq!(written, 300);
        let expected: Vec<u8> = (0..100u8).flat_map(|i| [i; 3]).collect();
        assert_eq!(sink, expected);
    }

    #[tokio::test]
    async fn test_pump_stops_on_error() {
        let chunks = vec![
            Ok(Bytes::from_static(b"abc")),
            Err(std::io::Error::other("connection reset")),
            Ok(Bytes::from_static(b"never")),
        ];
        let err = pump(stream::iter(chunks), Vec::new()).await.unwrap_err();
        assert!(format!("{err:#}").contains("connection reset"));
    }
}
