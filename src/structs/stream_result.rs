use serde::{Deserialize, Serialize};
use crate::enums::stream_end::StreamEnd;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StreamResult {
    pub session_id: String,
    pub text: String,
    pub fragments: usize,
    pub end: StreamEnd,
    pub finish_reason: Option<String>,
    pub discarded_bytes: usize,
    pub elapsed_ms: i64,
}

impl StreamResult {
    pub fn was_cancelled(&self) -> bool {
        self.end == StreamEnd::Cancelled
    }
}
