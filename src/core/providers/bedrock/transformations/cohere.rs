//! Cohere Model Transformations

use serde_json::{Value, json};

use super::{VendorContent, VendorOutput, VendorRequest, missing_field, string_at};
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::providers::bedrock::model_config::CohereApi;

/// Transform request for Cohere models
pub fn transform_request(api: CohereApi, request: &VendorRequest<'_>) -> Value {
    match api {
        CohereApi::Chat => transform_command_r_request(request),
        CohereApi::Generate => transform_command_request(request),
    }
}

/// Command R models (chat format)
fn transform_command_r_request(request: &VendorRequest<'_>) -> Value {
    json!({
        "message": request.prompt,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "p": request.top_p,
    })
}

/// Older Command models (prompt format)
fn transform_command_request(request: &VendorRequest<'_>) -> Value {
    json!({
        "prompt": request.prompt,
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
        "p": request.top_p,
    })
}

pub fn transform_response(
    api: CohereApi,
    payload: &Value,
    raw: &str,
) -> Result<VendorOutput, BedrockError> {
    let (text_path, reason_path): (&[&str], &[&str]) = match api {
        CohereApi::Chat => (&["text"], &["finish_reason"]),
        CohereApi::Generate => (
            &["generations", "0", "text"],
            &["generations", "0", "finish_reason"],
        ),
    };

    let text = string_at(payload, text_path).ok_or_else(|| missing_field("cohere", text_path, raw))?;

    Ok(VendorOutput {
        content: VendorContent::Text(text.trim().to_string()),
        usage: None,
        stop_reason: string_at(payload, reason_path).map(str::to_string),
    })
}
