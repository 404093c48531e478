//! Amazon Titan Model Transformations

use serde_json::{Value, json};

use super::{VendorContent, VendorOutput, VendorRequest, missing_field, string_at, token_count, value_at};
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::types::TokenUsage;

/// Transform request for Amazon Titan text models
pub fn transform_titan_request(request: &VendorRequest<'_>) -> Value {
    json!({
        "inputText": request.prompt,
        "textGenerationConfig": {
            "maxTokenCount": request.max_tokens,
            "temperature": request.temperature,
            "topP": request.top_p,
        }
    })
}

/// Titan returns `{"inputTextTokenCount": n, "results": [{"tokenCount": n, "outputText": "..."}]}`
pub fn transform_titan_response(payload: &Value, raw: &str) -> Result<VendorOutput, BedrockError> {
    let path = ["results", "0", "outputText"];
    let text = string_at(payload, &path).ok_or_else(|| missing_field("amazon", &path, raw))?;

    let usage = match (
        token_count(payload.get("inputTextTokenCount")),
        token_count(value_at(payload, &["results", "0", "tokenCount"])),
    ) {
        (Some(input), Some(output)) => Some(TokenUsage::new(input, output)),
        _ => None,
    };

    Ok(VendorOutput {
        content: VendorContent::Text(text.trim().to_string()),
        usage,
        stop_reason: string_at(payload, &["results", "0", "completionReason"]).map(str::to_string),
    })
}
