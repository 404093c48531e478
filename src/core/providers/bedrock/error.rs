//! Bedrock Provider Error Handling
//!
//! Error taxonomy for the Bedrock adapter and the mapping from HTTP status
//! codes and AWS error types onto it.
//!
//! | Variant | Produced by | Retryable |
//! |------|------|--------|
//! | UnsupportedVendor | model id prefix not recognized | No |
//! | Authentication | credential chain, 401/403, access denied | No |
//! | Throttling | 429, `ThrottlingException`, quota exceeded | Yes |
//! | InvalidResponse | vendor body missing the expected fields | No |
//! | MalformedStructuredOutput | JSON requested, text is not JSON | No |
//! | Configuration | invalid config, unreadable env file | No |
//! | Network | connect, TLS, timeout | Yes |
//! | Api | any other service error | 5xx only |
//! | Serialization | request body could not be encoded | No |
//!
//! Retryability is a hint for the host. The adapter itself never retries.

use serde_json::Value;

/// Errors surfaced by the Bedrock adapter
#[derive(Debug, Clone, thiserror::Error)]
pub enum BedrockError {
    #[error("Unsupported Bedrock vendor for model '{model_id}'")]
    UnsupportedVendor { model_id: String },

    #[error("Authentication failed for bedrock: {message}")]
    Authentication { message: String },

    #[error("Request throttled by bedrock: {message}")]
    Throttling { message: String },

    #[error("Invalid response from bedrock: {message}")]
    InvalidResponse { message: String, body: String },

    #[error("Structured output is not valid JSON: {raw}")]
    MalformedStructuredOutput { raw: String },

    #[error("Configuration error for bedrock: {message}")]
    Configuration { message: String },

    #[error("Network error for bedrock: {message}")]
    Network { message: String },

    #[error("API error for bedrock (status {status}, {error_type}): {message}")]
    Api {
        status: u16,
        error_type: String,
        message: String,
    },

    #[error("Serialization error for bedrock: {message}")]
    Serialization { message: String },
}

impl BedrockError {
    pub fn unsupported_vendor(model_id: impl Into<String>) -> Self {
        Self::UnsupportedVendor {
            model_id: model_id.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn throttling(message: impl Into<String>) -> Self {
        Self::Throttling {
            message: message.into(),
        }
    }

    /// Create an invalid-response error, keeping the raw body for diagnosis
    pub fn invalid_response(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            body: body.into(),
        }
    }

    pub fn malformed_structured_output(raw: impl Into<String>) -> Self {
        Self::MalformedStructuredOutput { raw: raw.into() }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn api(status: u16, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            error_type: error_type.into(),
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Whether the host may reasonably retry the failed call
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Throttling { .. } | Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short machine-readable name of the variant, used in logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedVendor { .. } => "unsupported_vendor",
            Self::Authentication { .. } => "authentication",
            Self::Throttling { .. } => "throttling",
            Self::InvalidResponse { .. } => "invalid_response",
            Self::MalformedStructuredOutput { .. } => "malformed_structured_output",
            Self::Configuration { .. } => "configuration",
            Self::Network { .. } => "network",
            Self::Api { .. } => "api",
            Self::Serialization { .. } => "serialization",
        }
    }
}

/// Maps Bedrock HTTP failures onto [`BedrockError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BedrockErrorMapper;

impl BedrockErrorMapper {
    /// Map a non-success HTTP response.
    ///
    /// `error_type_header` is the raw `x-amzn-ErrorType` header, e.g.
    /// `ThrottlingException:http://internal.amazon.com/coral/com.amazon.bedrock/`.
    /// When the header is absent the `__type` field of the body is used.
    pub fn map_http_error(
        &self,
        status_code: u16,
        error_type_header: Option<&str>,
        response_body: &str,
    ) -> BedrockError {
        let parsed: Option<Value> = serde_json::from_str(response_body).ok();

        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message").or_else(|| v.get("Message")))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| response_body.trim().to_string());

        let error_type = error_type_header
            .map(str::to_string)
            .or_else(|| {
                parsed
                    .as_ref()
                    .and_then(|v| v.get("__type"))
                    .and_then(|t| t.as_str())
                    .map(str::to_string)
            })
            .map(|t| normalize_error_type(&t))
            .unwrap_or_default();

        match error_type.as_str() {
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "ExpiredTokenException"
            | "InvalidSignatureException"
            | "IncompleteSignature"
            | "MissingAuthenticationTokenException" => {
                return BedrockError::authentication(format!("{}: {}", error_type, message));
            }
            "ThrottlingException" | "ServiceQuotaExceededException" | "TooManyRequestsException" => {
                return BedrockError::throttling(format!("{}: {}", error_type, message));
            }
            _ => {}
        }

        match status_code {
            401 | 403 => BedrockError::authentication(message),
            429 => BedrockError::throttling(message),
            _ => {
                let error_type = if error_type.is_empty() {
                    format!("HTTP {}", status_code)
                } else {
                    error_type
                };
                BedrockError::api(status_code, error_type, message)
            }
        }
    }

    pub fn map_network_error(&self, error: &reqwest::Error) -> BedrockError {
        if error.is_timeout() {
            BedrockError::network(format!("Request timed out: {}", error))
        } else {
            BedrockError::network(format!("Network error: {}", error))
        }
    }
}

/// `ThrottlingException:http://...` and `com.amazon#ThrottlingException` both
/// become `ThrottlingException`.
fn normalize_error_type(raw: &str) -> String {
    let without_uri = raw.split(':').next().unwrap_or(raw);
    without_uri
        .rsplit('#')
        .next()
        .unwrap_or(without_uri)
        .trim()
        .to_string()
}
