//! E2E tests against the live Bedrock runtime
//!
//! These tests make real API calls and incur cost.
//! Run with: cargo test -- --ignored

#[cfg(test)]
mod tests {
    use bedrock_extract::{BedrockLanguageModel, LanguageModel, ModelConfig, OutputPayload};
    use serde_json::json;

    use crate::skip_without_env;

    fn live_config() -> Option<ModelConfig> {
        let model_id = std::env::var("BEDROCK_MODEL_ID").ok()?;
        let mut config = ModelConfig::new(model_id).with_max_output_tokens(64);
        config.region = std::env::var("AWS_REGION").ok();
        config.profile = std::env::var("AWS_PROFILE").ok();
        Some(config)
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_text_batch() {
        skip_without_env!("BEDROCK_MODEL_ID");
        let Some(config) = live_config() else { return };

        let model = BedrockLanguageModel::new(config).await.unwrap();
        let outputs = model
            .infer(
                &[
                    "Reply with the single word: alpha".to_string(),
                    "Reply with the single word: beta".to_string(),
                ],
                None,
            )
            .await
            .unwrap();

        assert_eq!(outputs.len(), 2);
        for output in &outputs {
            assert!(matches!(output.output, OutputPayload::Text(_)));
        }
    }

    #[tokio::test]
    #[ignore]
    async fn test_live_structured_output() {
        skip_without_env!("BEDROCK_MODEL_ID");
        let Some(config) = live_config() else { return };

        let schema = json!({
            "type": "object",
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        });
        let model = BedrockLanguageModel::new(config.with_structured_output(Some(schema)))
            .await
            .unwrap();

        let outputs = model
            .infer(&["Which city is the capital of France?".to_string()], None)
            .await
            .unwrap();
        assert!(outputs[0].output.is_json());
    }
}
