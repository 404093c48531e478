//! Anthropic Claude Model Transformations
//!
//! Claude on Bedrock speaks the Messages API. Structured output is enforced
//! natively by forcing a single tool whose `input_schema` is the requested
//! schema; the tool call's `input` is then the structured result.

use serde_json::{Value, json};

use super::{VendorContent, VendorOutput, VendorRequest, missing_field, string_at, token_count};
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::types::TokenUsage;

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";

/// Name of the forced tool carrying the structured result
pub const STRUCTURED_OUTPUT_TOOL: &str = "structured_output";

/// Transform request for Anthropic Claude models
pub fn transform_request(request: &VendorRequest<'_>) -> Value {
    let mut body = json!({
        "anthropic_version": ANTHROPIC_VERSION,
        "messages": [{
            "role": "user",
            "content": [{"type": "text", "text": request.prompt}]
        }],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "top_p": request.top_p,
    });

    if let Some(schema) = request.native_schema {
        body["tools"] = json!([{
            "name": STRUCTURED_OUTPUT_TOOL,
            "description": "Record the extraction result. The input must match the schema exactly.",
            "input_schema": schema,
        }]);
        body["tool_choice"] = json!({"type": "tool", "name": STRUCTURED_OUTPUT_TOOL});
    }

    body
}

/// Extract content blocks, preferring a `tool_use` block when present
pub fn transform_response(payload: &Value, raw: &str) -> Result<VendorOutput, BedrockError> {
    let blocks = payload
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| missing_field("anthropic", &["content"], raw))?;

    let tool_input = blocks
        .iter()
        .find(|block| block.get("type").and_then(Value::as_str) == Some("tool_use"))
        .and_then(|block| block.get("input"));

    let content = match tool_input {
        Some(input) => VendorContent::Json(input.clone()),
        None => {
            let texts: Vec<&str> = blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .filter_map(|block| block.get("text").and_then(Value::as_str))
                .collect();
            if texts.is_empty() {
                return Err(missing_field("anthropic", &["content", "text"], raw));
            }
            VendorContent::Text(texts.concat().trim().to_string())
        }
    };

    let usage = match (
        token_count(payload.pointer("/usage/input_tokens")),
        token_count(payload.pointer("/usage/output_tokens")),
    ) {
        (Some(input), Some(output)) => Some(TokenUsage::new(input, output)),
        _ => None,
    };

    Ok(VendorOutput {
        content,
        usage,
        stop_reason: string_at(payload, &["stop_reason"]).map(str::to_string),
    })
}
