//! Structured output helpers
//!
//! Families without native schema enforcement get the schema written into the
//! prompt, and their reply text is parsed as JSON afterwards.

use serde_json::Value;

use super::error::BedrockError;

/// Prefix the task with JSON-only instructions and, when given, the schema
pub fn inject_schema(prompt: &str, schema: Option<&Value>) -> String {
    match schema {
        Some(schema) => format!(
            "Return ONLY valid JSON that matches this schema. Do not include explanations.\n\
             Schema (JSON Schema): {}\n\n\
             Task:\n{}",
            schema, prompt
        ),
        None => format!(
            "Return ONLY valid JSON. Do not include explanations.\n\n\
             Task:\n{}",
            prompt
        ),
    }
}

/// Parse generated text as JSON.
///
/// A single surrounding markdown code fence is stripped first. On failure the
/// untouched text is carried in [`BedrockError::MalformedStructuredOutput`].
pub fn parse_structured_text(text: &str) -> Result<Value, BedrockError> {
    serde_json::from_str(strip_code_fence(text))
        .map_err(|_| BedrockError::malformed_structured_output(text))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string (`json`) on the opening fence line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => inner.trim(),
    }
}
