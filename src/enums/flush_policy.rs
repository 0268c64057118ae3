use serde::{Deserialize, Serialize};

/// What happens to bytes still buffered when the transport ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushPolicy {
    /// Drop the unterminated tail and report how many bytes were lost.
    #[default]
    Discard,
    /// Classify the tail as one final line before closing the session.
    Flush,
}

impl FlushPolicy {
    pub fn from_flag(flush_trailing: bool) -> Self {
        if flush_trailing {
            FlushPolicy::Flush
        } else {
            FlushPolicy::Discard
        }
    }
}
