use std::convert::Infallible;
use std::fmt::Display;
use std::time::Duration;
use futures::{Stream, StreamExt};
use tokio::time::error::Elapsed;
use tokio_util::sync::CancellationToken;
use crate::enums::stream_end::StreamEnd;
use crate::errors::{CodillaError, CodillaResult};
use crate::services::stream_decoder::StreamDecoder;
use crate::structs::config::stream_config::StreamConfig;
use crate::structs::stream_result::StreamResult;
use crate::traits::stream_sink::StreamSink;

/// Drives a [`StreamDecoder`] over an async byte stream.
///
/// The only await point is the next chunk. Cancellation races that await
/// and drops the stream, which closes the underlying connection.
pub struct StreamReader {
    config: StreamConfig,
}

impl StreamReader {
    pub fn new(config: StreamConfig) -> Self {
        Self { config }
    }

    pub async fn read<S, B, E, K>(
        &self,
        mut stream: S,
        cancel: &CancellationToken,
        sink: &mut K,
    ) -> CodillaResult<StreamResult>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
        K: StreamSink + ?Sized,
    {
        let mut decoder = StreamDecoder::new(self.config.flush_policy());
        let session_id = decoder.session().id.to_string();
        let idle_timeout = self.config.idle_timeout();
        let mut discarded_bytes = 0;

        log::debug!("Stream {} opened", session_id);

        let end = loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    log::info!("🛑 Stream {} cancelled by consumer", session_id);
                    break StreamEnd::Cancelled;
                }
                next = next_chunk(&mut stream, idle_timeout) => next,
            };

            let item = match next {
                Ok(item) => item,
                Err(_) => {
                    log::error!("❌ Stream {} idle for {}s, giving up", session_id, self.config.idle_timeout_secs);
                    return Err(CodillaError::StreamTimeout {
                        session_id,
                        idle_secs: self.config.idle_timeout_secs,
                    });
                }
            };

            match item {
                Some(Ok(chunk)) => {
                    for fragment in decoder.decode_chunk(chunk.as_ref()) {
                        sink.on_fragment(&fragment);
                    }
                    if decoder.is_terminated() {
                        break StreamEnd::Sentinel;
                    }
                }
                Some(Err(e)) => {
                    log::error!("❌ Stream {} transport error: {}", session_id, e);
                    return Err(CodillaError::stream_error(&session_id, &e.to_string()));
                }
                None => {
                    let report = decoder.finish();
                    if let Some(fragment) = &report.flushed {
                        sink.on_fragment(fragment);
                    }
                    discarded_bytes = report.discarded_bytes;
                    break StreamEnd::EndOfStream;
                }
            }
        };

        // Release the connection before handing control back.
        drop(stream);

        let session = decoder.into_session();
        let result = StreamResult {
            session_id: session.id.to_string(),
            elapsed_ms: session.elapsed_ms(),
            text: session.assembled_text,
            fragments: session.fragments,
            end,
            finish_reason: session.finish_reason,
            discarded_bytes,
        };

        log::debug!(
            "Stream {} closed ({}): {} fragments, {} chars, {}ms",
            result.session_id,
            result.end.label(),
            result.fragments,
            result.text.chars().count(),
            result.elapsed_ms
        );

        sink.on_complete(&result);
        Ok(result)
    }
}

impl Default for StreamReader {
    fn default() -> Self {
        Self::new(StreamConfig::default())
    }
}

async fn next_chunk<S>(stream: &mut S, idle_timeout: Option<Duration>) -> Result<Option<S::Item>, Elapsed>
where
    S: Stream + Unpin,
{
    match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, stream.next()).await,
        None => Ok(stream.next().await),
    }
}

/// Re-chunks an in-memory transcript, e.g. a captured response body.
pub fn replay_stream(bytes: &[u8], chunk_size: usize) -> impl Stream<Item = Result<Vec<u8>, Infallible>> + Unpin {
    let chunks: Vec<Result<Vec<u8>, Infallible>> = bytes
        .chunks(chunk_size.max(1))
        .map(|chunk| Ok(chunk.to_vec()))
        .collect();
    futures::stream::iter(chunks)
}
