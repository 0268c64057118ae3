use std::time::Duration;

pub const CODILLA_API_KEY_ENV: &str = "CODILLA_API_KEY";
pub const CODILLA_GATEWAY_URL_ENV: &str = "CODILLA_GATEWAY_URL";

pub const CONFIG_DIR_NAME: &str = "codilla";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_REPLAY_CHUNK_SIZE: usize = 64;

pub const SSE_DATA_PREFIX: &str = "data: ";
pub const SSE_COMMENT_PREFIX: char = ':';
pub const SSE_DONE_SENTINEL: &str = "[DONE]";

pub const SPINNER_FRAME_MS: u64 = 150;

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
