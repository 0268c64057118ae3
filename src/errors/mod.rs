use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};
use crate::enums::gateway_error::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CodillaError {
    // Configuration errors
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Gateway status contract
    RateLimited {
        reason: String,
    },
    PaymentRequired {
        reason: String,
    },
    AuthenticationError {
        reason: String,
    },

    // Network/API errors
    NetworkError {
        operation: String,
        url: Option<String>,
        status_code: Option<u16>,
        reason: String,
    },
    MissingBody {
        url: String,
    },

    // Stream errors
    StreamError {
        session_id: String,
        reason: String,
    },
    StreamTimeout {
        session_id: String,
        idle_secs: u64,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
        context: Option<String>,
    },

    // System errors
    SystemError {
        operation: String,
        reason: String,
    },

    // User input errors
    UserInputError {
        input: String,
        expected: String,
        suggestion: String,
    },

    // Chained context
    MultipleErrors {
        errors: Vec<CodillaError>,
        context: String,
    },
}

impl CodillaError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn stream_error(session_id: &str, reason: &str) -> Self {
        Self::StreamError {
            session_id: session_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn system_error(operation: &str, reason: &str) -> Self {
        Self::SystemError {
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse_error(content_type: &str, line_number: Option<usize>, reason: &str, context: Option<&str>) -> Self {
        Self::ParseError {
            content_type: content_type.to_string(),
            line_number,
            reason: reason.to_string(),
            context: context.map(|s| s.to_string()),
        }
    }

    pub fn user_input_error(input: &str, expected: &str, suggestion: &str) -> Self {
        Self::UserInputError {
            input: input.to_string(),
            expected: expected.to_string(),
            suggestion: suggestion.to_string(),
        }
    }

    /// Whether retrying the whole request could succeed. Nothing retries
    /// automatically; this only drives the hint shown to the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RateLimited { .. } => true,
            Self::NetworkError { .. } => true,
            Self::StreamError { .. } => true,
            Self::StreamTimeout { .. } => true,
            Self::UserInputError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::PaymentRequired { .. } => false,
            Self::AuthenticationError { .. } => false,
            Self::MissingBody { .. } => false,
            Self::SystemError { .. } => false,
            Self::MultipleErrors { errors, .. } => errors.iter().any(|e| e.is_recoverable()),
            _ => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SystemError { .. } => ErrorSeverity::Critical,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::AuthenticationError { .. } => ErrorSeverity::High,
            Self::PaymentRequired { .. } => ErrorSeverity::High,
            Self::MissingBody { .. } => ErrorSeverity::High,
            Self::RateLimited { .. } => ErrorSeverity::Medium,
            Self::NetworkError { .. } => ErrorSeverity::Medium,
            Self::StreamError { .. } => ErrorSeverity::Medium,
            Self::StreamTimeout { .. } => ErrorSeverity::Medium,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
            Self::UserInputError { .. } => ErrorSeverity::Low,
            Self::MultipleErrors { errors, .. } => {
                errors.iter()
                    .map(|e| e.severity())
                    .max()
                    .unwrap_or(ErrorSeverity::Low)
            }
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::RateLimited { .. } => {
                "Rate limit reached, please try again later.".to_string()
            }
            Self::PaymentRequired { .. } => {
                "Credits exhausted, please add funds to continue.".to_string()
            }
            Self::AuthenticationError { reason } => {
                format!("Authentication failed: {}\n💡 Check the API key environment variable", reason)
            }
            Self::NetworkError { operation, url, status_code, reason } => {
                let mut msg = format!("Network error during {}: {}", operation, reason);
                if let Some(url) = url {
                    msg.push_str(&format!(" (URL: {})", url));
                }
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {})", code));
                }
                msg.push_str("\n💡 Check your internet connection and try again");
                msg
            }
            Self::MissingBody { url } => {
                format!("The gateway at '{}' returned no response body", url)
            }
            Self::StreamError { session_id, reason } => {
                format!("Stream {} aborted: {}", session_id, reason)
            }
            Self::StreamTimeout { session_id, idle_secs } => {
                format!("Stream {} stalled: no data for {}s", session_id, idle_secs)
            }
            Self::ParseError { content_type, line_number, reason, context } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                if let Some(ctx) = context {
                    msg.push_str(&format!("\nContext: {}", ctx));
                }
                msg.push_str("\n💡 Check the format and syntax of the input");
                msg
            }
            Self::SystemError { operation, reason } => {
                format!("System error during {}: {}", operation, reason)
            }
            Self::UserInputError { input, expected, suggestion } => {
                format!("Invalid input '{}': expected {}\n💡 {}", input, expected, suggestion)
            }
            Self::MultipleErrors { errors, context } => {
                let mut msg = format!("Multiple errors occurred during {}:\n", context);
                for (i, error) in errors.iter().enumerate() {
                    msg.push_str(&format!("  {}. {}\n", i + 1, error.user_message().replace('\n', "\n     ")));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }

    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::MultipleErrors { errors, context: existing_context } => {
                Self::MultipleErrors {
                    errors,
                    context: format!("{} -> {}", existing_context, context),
                }
            }
            _ => Self::MultipleErrors {
                errors: vec![self],
                context: context.to_string(),
            }
        }
    }
}

impl fmt::Display for CodillaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for CodillaError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for codilla operations
pub type CodillaResult<T> = Result<T, CodillaError>;

/// Turns errors into terminal notifications, one per failed operation.
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn handle_error(error: &CodillaError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());

        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 You can retry the request");
        }
    }
}

/// Extension trait for Result to add context
pub trait ResultExt<T> {
    fn with_context(self, context: &str) -> CodillaResult<T>;
    fn with_operation(self, operation: &str) -> CodillaResult<T>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<CodillaError>,
{
    fn with_context(self, context: &str) -> CodillaResult<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_operation(self, operation: &str) -> CodillaResult<T> {
        self.map_err(|e| {
            let codilla_error: CodillaError = e.into();
            match codilla_error {
                CodillaError::SystemError { reason, .. } => {
                    CodillaError::SystemError {
                        operation: operation.to_string(),
                        reason,
                    }
                }
                other => other.with_context(operation),
            }
        })
    }
}

impl From<GatewayError> for CodillaError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::RateLimited(reason) => CodillaError::RateLimited { reason },
            GatewayError::PaymentRequired(reason) => CodillaError::PaymentRequired { reason },
            GatewayError::Authentication(reason) => CodillaError::AuthenticationError { reason },
            GatewayError::Http { status, body } => CodillaError::NetworkError {
                operation: "chat completion".to_string(),
                url: None,
                status_code: Some(status),
                reason: body,
            },
            GatewayError::MissingBody { url } => CodillaError::MissingBody { url },
            GatewayError::Network(reason) => CodillaError::NetworkError {
                operation: "chat completion".to_string(),
                url: None,
                status_code: None,
                reason,
            },
        }
    }
}

/// Convert from standard library errors
impl From<std::io::Error> for CodillaError {
    fn from(error: std::io::Error) -> Self {
        CodillaError::SystemError {
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CodillaError {
    fn from(error: serde_json::Error) -> Self {
        CodillaError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
            context: None,
        }
    }
}

impl From<toml::de::Error> for CodillaError {
    fn from(error: toml::de::Error) -> Self {
        CodillaError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
            context: None,
        }
    }
}

impl From<reqwest::Error> for CodillaError {
    fn from(error: reqwest::Error) -> Self {
        CodillaError::NetworkError {
            operation: "HTTP request".to_string(),
            url: error.url().map(|u| u.to_string()),
            status_code: error.status().map(|s| s.as_u16()),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_specific_messages_for_rate_limit_and_billing() {
        let rate: CodillaError = GatewayError::RateLimited("busy".to_string()).into();
        assert!(rate.user_message().contains("try again later"));
        assert!(rate.is_recoverable());

        let billing: CodillaError = GatewayError::PaymentRequired("0 credits".to_string()).into();
        assert!(billing.user_message().contains("add funds"));
        assert!(!billing.is_recoverable());
    }

    #[test]
    fn other_statuses_are_generic_network_errors() {
        let err: CodillaError = GatewayError::Http { status: 500, body: "boom".to_string() }.into();
        match &err {
            CodillaError::NetworkError { status_code, .. } => assert_eq!(*status_code, Some(500)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn context_chains_accumulate() {
        let err = CodillaError::system_error("read", "denied")
            .with_context("decode")
            .with_context("cli");
        match err {
            CodillaError::MultipleErrors { errors, context } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(context, "decode -> cli");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn with_operation_renames_system_errors() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        match result.with_operation("read transcript") {
            Err(CodillaError::SystemError { operation, .. }) => assert_eq!(operation, "read transcript"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
