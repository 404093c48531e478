//! Meta Llama Model Transformations

use serde_json::{Value, json};

use super::{VendorContent, VendorOutput, VendorRequest, missing_field, string_at, token_count};
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::providers::bedrock::model_config::LlamaPromptFormat;
use crate::core::types::TokenUsage;

/// Transform request for Meta Llama models
pub fn transform_request(format: LlamaPromptFormat, request: &VendorRequest<'_>) -> Value {
    let prompt = match format {
        LlamaPromptFormat::Llama3 => format_llama3_prompt(request.prompt),
        LlamaPromptFormat::Llama2 => format_llama2_prompt(request.prompt),
    };

    json!({
        "prompt": prompt,
        "max_gen_len": request.max_tokens,
        "temperature": request.temperature,
        "top_p": request.top_p,
    })
}

fn format_llama3_prompt(prompt: &str) -> String {
    format!(
        "<|begin_of_text|><|start_header_id|>user<|end_header_id|>\n\n{}<|eot_id|><|start_header_id|>assistant<|end_header_id|>\n\n",
        prompt
    )
}

fn format_llama2_prompt(prompt: &str) -> String {
    format!("<s>[INST] {} [/INST]", prompt)
}

/// Llama returns `{"generation": "...", "prompt_token_count": n, "generation_token_count": n}`
pub fn transform_response(payload: &Value, raw: &str) -> Result<VendorOutput, BedrockError> {
    let text = string_at(payload, &["generation"])
        .ok_or_else(|| missing_field("meta", &["generation"], raw))?;

    let usage = match (
        token_count(payload.get("prompt_token_count")),
        token_count(payload.get("generation_token_count")),
    ) {
        (Some(input), Some(output)) => Some(TokenUsage::new(input, output)),
        _ => None,
    };

    Ok(VendorOutput {
        content: VendorContent::Text(text.trim().to_string()),
        usage,
        stop_reason: string_at(payload, &["stop_reason"]).map(str::to_string),
    })
}
