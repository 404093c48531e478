//! Model-specific Request Transformations
//!
//! Builds the vendor request body for one prompt and extracts the generated
//! content from the vendor response. Dispatch happens on
//! [`BedrockModelFamily`], which is fixed when the adapter is constructed.

pub mod amazon;
pub mod anthropic;
pub mod cohere;
pub mod meta;
pub mod mistral;

use serde_json::Value;

use super::error::BedrockError;
use super::model_config::BedrockModelFamily;
use crate::core::types::TokenUsage;

/// Everything a vendor body needs for one prompt
#[derive(Debug, Clone, Copy)]
pub struct VendorRequest<'a> {
    /// Final prompt text, after any schema injection
    pub prompt: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    /// Set only when the family enforces the schema natively
    pub native_schema: Option<&'a Value>,
}

/// Content extracted from a vendor response
#[derive(Debug, Clone, PartialEq)]
pub enum VendorContent {
    Text(String),
    /// Already-structured content, e.g. a forced tool call
    Json(Value),
}

/// Normalized vendor response
#[derive(Debug, Clone, PartialEq)]
pub struct VendorOutput {
    pub content: VendorContent,
    pub usage: Option<TokenUsage>,
    pub stop_reason: Option<String>,
}

impl BedrockModelFamily {
    /// Build the `InvokeModel` body for this family
    pub fn build_request(&self, request: &VendorRequest<'_>) -> Value {
        match self {
            Self::Anthropic => anthropic::transform_request(request),
            Self::Mistral => mistral::transform_request(request),
            Self::Cohere(api) => cohere::transform_request(*api, request),
            Self::Meta(format) => meta::transform_request(*format, request),
            Self::Titan => amazon::transform_titan_request(request),
        }
    }

    /// Parse an `InvokeModel` response body for this family
    pub fn parse_response(&self, body: &[u8]) -> Result<VendorOutput, BedrockError> {
        let raw = String::from_utf8_lossy(body);
        let payload: Value = serde_json::from_slice(body).map_err(|e| {
            BedrockError::invalid_response(
                format!("{} response is not JSON: {}", self, e),
                raw.as_ref(),
            )
        })?;

        match self {
            Self::Anthropic => anthropic::transform_response(&payload, &raw),
            Self::Mistral => mistral::transform_response(&payload, &raw),
            Self::Cohere(api) => cohere::transform_response(*api, &payload, &raw),
            Self::Meta(_) => meta::transform_response(&payload, &raw),
            Self::Titan => amazon::transform_titan_response(&payload, &raw),
        }
    }
}

/// Look up a string at `path` (object keys, or `0`-style array indices)
pub(crate) fn string_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a str> {
    value_at(payload, path).and_then(Value::as_str)
}

pub(crate) fn value_at<'a>(payload: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(payload, |current, segment| match current {
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => current.get(*segment),
    })
}

pub(crate) fn token_count(value: Option<&Value>) -> Option<u32> {
    value
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// The standard failure when a vendor text field is absent
pub(crate) fn missing_field(vendor: &str, path: &[&str], raw: &str) -> BedrockError {
    BedrockError::invalid_response(
        format!("{} response has no '{}' field", vendor, path.join(".")),
        raw,
    )
}
