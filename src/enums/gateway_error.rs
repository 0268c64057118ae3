use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Payment required: {0}")]
    PaymentRequired(String),

    #[error("Authentication Error: {0}")]
    Authentication(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Response from {url} has no body")]
    MissingBody { url: String },

    #[error("Network Error: {0}")]
    Network(String),
}

impl GatewayError {
    /// Maps a non-success status and its body text onto the gateway contract.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            429 => GatewayError::RateLimited(body),
            402 => GatewayError::PaymentRequired(body),
            401 | 403 => GatewayError::Authentication(body),
            _ => GatewayError::Http { status, body },
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            GatewayError::RateLimited(_) => Some(429),
            GatewayError::PaymentRequired(_) => Some(402),
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
