//! Model configuration structures

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default sampling temperature
pub fn default_temperature() -> f32 {
    0.2
}

/// Default output token limit
pub fn default_max_output_tokens() -> u32 {
    1024
}

/// Default nucleus sampling value
pub fn default_top_p() -> f32 {
    0.9
}

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Uniform configuration for one Bedrock-backed model
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Bedrock model id, optionally with a `bedrock:` scheme and a
    /// cross-region profile prefix
    pub model_id: String,
    /// Registry provider name; routing falls back to model id patterns
    #[serde(default)]
    pub provider: Option<String>,
    /// AWS region
    #[serde(default)]
    pub region: Option<String>,
    /// Named AWS profile for the SDK credential chain
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub aws_access_key_id: Option<String>,
    #[serde(default)]
    pub aws_secret_access_key: Option<String>,
    #[serde(default)]
    pub aws_session_token: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Return JSON instead of text
    #[serde(default)]
    pub structured_output: bool,
    /// JSON Schema the output should follow
    #[serde(default)]
    pub response_schema: Option<Value>,
    /// Runtime endpoint override (VPC endpoints, local mocks)
    #[serde(default)]
    pub endpoint_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ModelConfig {
    /// Configuration with defaults for everything but the model id
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            provider: None,
            region: None,
            profile: None,
            aws_access_key_id: None,
            aws_secret_access_key: None,
            aws_session_token: None,
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            top_p: default_top_p(),
            structured_output: false,
            response_schema: None,
            endpoint_url: None,
            timeout_seconds: default_timeout(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    pub fn with_static_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
    ) -> Self {
        self.aws_access_key_id = Some(access_key_id.into());
        self.aws_secret_access_key = Some(secret_access_key.into());
        self.aws_session_token = session_token;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Request JSON output, optionally constrained by a schema
    pub fn with_structured_output(mut self, schema: Option<Value>) -> Self {
        self.structured_output = true;
        self.response_schema = schema;
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

impl std::fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model_id", &self.model_id)
            .field("provider", &self.provider)
            .field("region", &self.region)
            .field("profile", &self.profile)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field(
                "aws_secret_access_key",
                &self.aws_secret_access_key.as_ref().map(|_| "** redacted **"),
            )
            .field(
                "aws_session_token",
                &self.aws_session_token.as_ref().map(|_| "** redacted **"),
            )
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("top_p", &self.top_p)
            .field("structured_output", &self.structured_output)
            .field("response_schema", &self.response_schema)
            .field("endpoint_url", &self.endpoint_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// Per-call overrides of the configured sampling parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InferenceOverrides {
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_output_tokens: Option<u32>,
    #[serde(default)]
    pub top_p: Option<f32>,
    /// Replaces the configured schema for this call
    #[serde(default)]
    pub response_schema: Option<Value>,
}

impl InferenceOverrides {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}
