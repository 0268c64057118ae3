use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamEnd {
    /// A `data: [DONE]` line was processed.
    Sentinel,
    /// The transport closed without a sentinel.
    EndOfStream,
    Cancelled,
}

impl StreamEnd {
    pub fn label(&self) -> &'static str {
        match self {
            StreamEnd::Sentinel => "sentinel",
            StreamEnd::EndOfStream => "end of stream",
            StreamEnd::Cancelled => "cancelled",
        }
    }
}
