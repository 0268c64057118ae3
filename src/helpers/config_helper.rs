use crate::config::constants::{CODILLA_API_KEY_ENV, DEFAULT_REQUEST_TIMEOUT_SECS};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_base_url() -> String {
        "https://api.openai.com/v1".to_string()
    }

    pub fn default_model() -> String {
        "gpt-4o-mini".to_string()
    }

    pub fn default_api_key_env() -> String {
        CODILLA_API_KEY_ENV.to_string()
    }

    pub fn default_request_timeout_secs() -> u64 {
        DEFAULT_REQUEST_TIMEOUT_SECS
    }
}
