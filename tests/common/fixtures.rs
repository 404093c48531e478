//! Test fixtures
//!
//! Model ids, configurations and vendor-shaped response bodies.

use bedrock_extract::ModelConfig;
use serde_json::{Value, json};

/// One model id per supported family
pub const ANTHROPIC_MODEL: &str = "anthropic.claude-3-haiku-20240307-v1:0";
pub const MISTRAL_MODEL: &str = "mistral.mistral-large-2402-v1:0";
pub const COHERE_CHAT_MODEL: &str = "cohere.command-r-plus-v1:0";
pub const COHERE_GENERATE_MODEL: &str = "cohere.command-text-v14";
pub const LLAMA3_MODEL: &str = "meta.llama3-8b-instruct-v1:0";
pub const LLAMA2_MODEL: &str = "meta.llama2-13b-chat-v1";
pub const TITAN_MODEL: &str = "amazon.titan-text-express-v1";

pub const ALL_MODELS: &[&str] = &[
    ANTHROPIC_MODEL,
    MISTRAL_MODEL,
    COHERE_CHAT_MODEL,
    COHERE_GENERATE_MODEL,
    LLAMA3_MODEL,
    LLAMA2_MODEL,
    TITAN_MODEL,
];

/// Config with static credentials so no AWS chain lookup is needed
pub fn config_for(model_id: &str) -> ModelConfig {
    ModelConfig::new(model_id)
        .with_region("us-east-1")
        .with_static_credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY", None)
}

/// Schema used by the structured-output tests
pub fn entity_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "entities": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": {"type": "string"},
                        "label": {"type": "string"}
                    },
                    "required": ["id", "label"]
                }
            }
        },
        "required": ["entities"]
    })
}

pub fn prompts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Response body carrying `text` in the shape the request body asks for
pub fn response_for_request(request: &Value, text: &str) -> Value {
    if request.get("anthropic_version").is_some() {
        json!({
            "content": [{"type": "text", "text": text}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    } else if request.get("inputText").is_some() {
        json!({
            "inputTextTokenCount": 10,
            "results": [{"tokenCount": 5, "outputText": text, "completionReason": "FINISH"}]
        })
    } else if request.get("message").is_some() {
        json!({"text": text, "finish_reason": "COMPLETE"})
    } else if request.get("max_gen_len").is_some() {
        json!({
            "generation": text,
            "prompt_token_count": 10,
            "generation_token_count": 5,
            "stop_reason": "stop"
        })
    } else if request.get("p").is_some() {
        json!({"generations": [{"text": text, "finish_reason": "COMPLETE"}]})
    } else {
        json!({"outputs": [{"text": text, "stop_reason": "stop"}]})
    }
}

/// The prompt text inside a vendor request body
pub fn prompt_of(request: &Value) -> String {
    let text = request
        .pointer("/messages/0/content/0/text")
        .or_else(|| request.get("inputText"))
        .or_else(|| request.get("message"))
        .or_else(|| request.get("prompt"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    text.to_string()
}
