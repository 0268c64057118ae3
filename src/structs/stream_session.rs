use chrono::{DateTime, Utc};
use uuid::Uuid;

/// State of one streamed response, owned by the task reading it.
#[derive(Debug, Clone)]
pub struct StreamSession {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Decoded text that has not yet formed a complete line.
    pub raw_chunk_buffer: String,
    /// Everything delivered so far. Only ever appended to.
    pub assembled_text: String,
    pub terminated: bool,
    pub fragments: usize,
    pub finish_reason: Option<String>,
}

impl StreamSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            raw_chunk_buffer: String::new(),
            assembled_text: String::new(),
            terminated: false,
            fragments: 0,
            finish_reason: None,
        }
    }

    pub fn append_delta(&mut self, text: &str) {
        self.assembled_text.push_str(text);
        self.fragments += 1;
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}

impl Default for StreamSession {
    fn default() -> Self {
        Self::new()
    }
}
