use crate::config::constants::{SSE_COMMENT_PREFIX, SSE_DATA_PREFIX, SSE_DONE_SENTINEL};
use crate::enums::flush_policy::FlushPolicy;
use crate::enums::line_outcome::LineOutcome;
use crate::helpers::utf8_decoder::Utf8Decoder;
use crate::structs::ai::chat_stream_chunk::ChatStreamChunk;
use crate::structs::finish_report::FinishReport;
use crate::structs::stream_session::StreamSession;

/// Turns the raw bytes of a completion stream into text deltas.
///
/// Lines are framed by `\n` (a trailing `\r` is stripped). Only lines that
/// start with `data: ` carry events; the payload is either the `[DONE]`
/// sentinel or a JSON chunk whose `choices[0].delta.content` is the delta.
///
/// A `data:` payload that fails to parse is treated as incomplete rather
/// than malformed: the line is put back on the buffer and decoding resumes
/// when more bytes arrive.
pub struct StreamDecoder {
    session: StreamSession,
    utf8: Utf8Decoder,
    flush_policy: FlushPolicy,
}

impl StreamDecoder {
    pub fn new(flush_policy: FlushPolicy) -> Self {
        Self {
            session: StreamSession::new(),
            utf8: Utf8Decoder::new(),
            flush_policy,
        }
    }

    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    pub fn into_session(self) -> StreamSession {
        self.session
    }

    pub fn is_terminated(&self) -> bool {
        self.session.terminated
    }

    pub fn assembled_text(&self) -> &str {
        &self.session.assembled_text
    }

    pub fn buffered(&self) -> &str {
        &self.session.raw_chunk_buffer
    }

    /// Feeds one network chunk and returns the deltas it completed, in order.
    pub fn decode_chunk(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.session.terminated {
            return Vec::new();
        }

        let text = self.utf8.decode(bytes);
        self.session.raw_chunk_buffer.push_str(&text);
        self.drain_lines()
    }

    fn drain_lines(&mut self) -> Vec<String> {
        let mut deltas = Vec::new();

        while let Some(newline_pos) = self.session.raw_chunk_buffer.find('\n') {
            let mut line: String = self.session.raw_chunk_buffer.drain(..=newline_pos).collect();
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }

            match self.classify(&line) {
                LineOutcome::Skip => continue,
                LineOutcome::Done => {
                    log::debug!("Stream {} reached [DONE]", self.session.id);
                    self.session.terminated = true;
                    break;
                }
                LineOutcome::Delta(delta) => {
                    self.session.append_delta(&delta);
                    deltas.push(delta);
                }
                LineOutcome::NeedMoreData => {
                    log::debug!(
                        "Stream {}: incomplete data line ({} bytes), waiting for more input",
                        self.session.id,
                        line.len()
                    );
                    line.push('\n');
                    self.session.raw_chunk_buffer.insert_str(0, &line);
                    break;
                }
            }
        }

        deltas
    }

    /// Closes the session at transport end-of-stream.
    pub fn finish(&mut self) -> FinishReport {
        if self.session.terminated {
            return FinishReport::default();
        }
        self.session.terminated = true;

        let tail = self.utf8.finish();
        self.session.raw_chunk_buffer.push_str(&tail);
        let residual = std::mem::take(&mut self.session.raw_chunk_buffer);

        if residual.trim().is_empty() {
            return FinishReport::default();
        }

        if self.flush_policy == FlushPolicy::Flush {
            let line = residual.trim_end_matches(['\r', '\n']);
            if let LineOutcome::Delta(delta) = self.classify(line) {
                self.session.append_delta(&delta);
                return FinishReport {
                    flushed: Some(delta),
                    discarded_bytes: 0,
                };
            }
        }

        log::warn!(
            "⚠️ Stream {} ended with {} undelivered bytes: {:?}",
            self.session.id,
            residual.len(),
            preview(&residual)
        );

        FinishReport {
            flushed: None,
            discarded_bytes: residual.len(),
        }
    }

    fn classify(&mut self, line: &str) -> LineOutcome {
        let (outcome, chunk) = classify_line_with_chunk(line);
        if let Some(chunk) = chunk {
            if let Some(reason) = chunk.finish_reason() {
                self.session.finish_reason = Some(reason.to_string());
            }
            if let Some(error) = &chunk.error {
                log::warn!(
                    "⚠️ Stream {} carried an error event: {} ({})",
                    self.session.id,
                    error.message.as_deref().unwrap_or("unknown error"),
                    error.error_type.as_deref().unwrap_or("api_error")
                );
            }
        }
        outcome
    }
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new(FlushPolicy::default())
    }
}

/// Classifies one line with its newline (and any `\r`) already removed.
pub fn classify_line(line: &str) -> LineOutcome {
    classify_line_with_chunk(line).0
}

fn classify_line_with_chunk(line: &str) -> (LineOutcome, Option<ChatStreamChunk>) {
    if line.is_empty() || line.starts_with(SSE_COMMENT_PREFIX) {
        return (LineOutcome::Skip, None);
    }

    let Some(payload) = line.strip_prefix(SSE_DATA_PREFIX) else {
        return (LineOutcome::Skip, None);
    };

    let payload = payload.trim();
    if payload == SSE_DONE_SENTINEL {
        return (LineOutcome::Done, None);
    }

    let value = match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(value) => value,
        Err(_) => return (LineOutcome::NeedMoreData, None),
    };

    // Valid JSON of an unexpected shape is a control frame, not an error.
    let Ok(chunk) = serde_json::from_value::<ChatStreamChunk>(value) else {
        return (LineOutcome::Skip, None);
    };

    let outcome = match chunk.delta_content() {
        Some(content) => LineOutcome::Delta(content.to_string()),
        None => LineOutcome::Skip,
    };
    (outcome, Some(chunk))
}

fn preview(text: &str) -> String {
    const MAX_CHARS: usize = 80;
    if text.chars().count() <= MAX_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(MAX_CHARS).collect();
    cut.push('…');
    cut
}
