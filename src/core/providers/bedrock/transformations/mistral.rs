//! Mistral Model Transformations

use serde_json::{Value, json};

use super::{VendorContent, VendorOutput, VendorRequest, missing_field, string_at};
use crate::core::providers::bedrock::error::BedrockError;

/// Transform request for Mistral models
pub fn transform_request(request: &VendorRequest<'_>) -> Value {
    json!({
        "prompt": format_mistral_prompt(request.prompt),
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "top_p": request.top_p,
    })
}

/// Wrap a single user turn in Mistral's instruction tags
fn format_mistral_prompt(prompt: &str) -> String {
    format!("<s>[INST] {} [/INST]", prompt)
}

/// Mistral returns `{"outputs": [{"text": "...", "stop_reason": "..."}]}`
pub fn transform_response(payload: &Value, raw: &str) -> Result<VendorOutput, BedrockError> {
    let path = ["outputs", "0", "text"];
    let text = string_at(payload, &path).ok_or_else(|| missing_field("mistral", &path, raw))?;

    Ok(VendorOutput {
        content: VendorContent::Text(text.trim().to_string()),
        usage: None,
        stop_reason: string_at(payload, &["outputs", "0", "stop_reason"]).map(str::to_string),
    })
}
