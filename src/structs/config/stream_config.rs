use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::enums::flush_policy::FlushPolicy;

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct StreamConfig {
    /// Seconds without a chunk before the stream is abandoned; 0 waits forever.
    #[serde(default)]
    pub idle_timeout_secs: u64,

    #[serde(default)]
    pub flush_trailing: bool,
}

impl StreamConfig {
    pub fn idle_timeout(&self) -> Option<Duration> {
        match self.idle_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    pub fn flush_policy(&self) -> FlushPolicy {
        FlushPolicy::from_flag(self.flush_trailing)
    }
}
