//! Main Bedrock Provider Implementation
//!
//! Contains the BedrockLanguageModel struct and its LanguageModel trait
//! implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use super::client::{BedrockClient, BedrockTransport, InvokeModelOutput};
use super::credentials::resolve_aws_context;
use super::error::BedrockError;
use super::model_config::{BedrockModelFamily, StructuredOutputMode, normalize_model_id};
use super::structured::{inject_schema, parse_structured_text};
use super::transformations::{VendorContent, VendorRequest};
use crate::config::{InferenceOverrides, ModelConfig};
use crate::core::traits::LanguageModel;
use crate::core::types::{OutputPayload, ScoredOutput, TokenUsage};

/// Name the adapter is registered under
pub const PROVIDER_NAME: &str = "BedrockLanguageModel";

/// Effective parameters for one `infer` call
struct CallParams<'a> {
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    schema: Option<&'a Value>,
}

/// AWS Bedrock language model adapter
pub struct BedrockLanguageModel {
    config: ModelConfig,
    model_id: String,
    family: BedrockModelFamily,
    transport: Arc<dyn BedrockTransport>,
}

impl BedrockLanguageModel {
    /// Create an adapter backed by a signed HTTP client.
    ///
    /// Credentials and region are resolved here, once.
    pub async fn new(config: ModelConfig) -> Result<Self, BedrockError> {
        let family = BedrockModelFamily::from_model_id(&config.model_id)?;
        config.check()?;

        let context = resolve_aws_context(&config).await?;
        let client = BedrockClient::new(
            context,
            config.endpoint_url.as_deref(),
            Duration::from_secs(config.timeout_seconds),
        )?;

        info!(
            model_id = %config.model_id,
            family = %family,
            region = client.region(),
            "Created Bedrock language model"
        );
        Ok(Self::from_parts(config, family, Arc::new(client)))
    }

    /// Create an adapter over an existing transport
    pub fn with_transport(
        config: ModelConfig,
        transport: Arc<dyn BedrockTransport>,
    ) -> Result<Self, BedrockError> {
        let family = BedrockModelFamily::from_model_id(&config.model_id)?;
        config.check()?;
        Ok(Self::from_parts(config, family, transport))
    }

    fn from_parts(
        config: ModelConfig,
        family: BedrockModelFamily,
        transport: Arc<dyn BedrockTransport>,
    ) -> Self {
        Self {
            model_id: normalize_model_id(&config.model_id),
            config,
            family,
            transport,
        }
    }

    pub fn family(&self) -> BedrockModelFamily {
        self.family
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn call_params<'a>(&'a self, overrides: Option<&'a InferenceOverrides>) -> CallParams<'a> {
        CallParams {
            temperature: overrides
                .and_then(|o| o.temperature)
                .unwrap_or(self.config.temperature),
            max_tokens: overrides
                .and_then(|o| o.max_output_tokens)
                .unwrap_or(self.config.max_output_tokens),
            top_p: overrides
                .and_then(|o| o.top_p)
                .unwrap_or(self.config.top_p),
            schema: overrides
                .and_then(|o| o.response_schema.as_ref())
                .or(self.config.response_schema.as_ref()),
        }
    }

    /// Run one prompt through build, invoke, parse
    async fn infer_one(
        &self,
        prompt: &str,
        params: &CallParams<'_>,
    ) -> Result<ScoredOutput, BedrockError> {
        let structured = self.config.structured_output;
        let native = structured
            && params.schema.is_some()
            && self.family.structured_output_mode() == StructuredOutputMode::Native;

        let prompt = if structured && !native {
            inject_schema(prompt, params.schema)
        } else {
            prompt.to_string()
        };

        let request = VendorRequest {
            prompt: &prompt,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            top_p: params.top_p,
            native_schema: if native { params.schema } else { None },
        };
        let body = serde_json::to_vec(&self.family.build_request(&request))
            .map_err(|e| BedrockError::serialization(e.to_string()))?;

        let response = self.transport.invoke_model(&self.model_id, body).await?;
        let vendor_output = self.family.parse_response(&response.body)?;

        let output = match vendor_output.content {
            VendorContent::Json(value) => OutputPayload::Json(value),
            VendorContent::Text(text) if structured => {
                OutputPayload::Json(parse_structured_text(&text)?)
            }
            VendorContent::Text(text) => OutputPayload::Text(text),
        };

        Ok(ScoredOutput::new(output)
            .with_usage(vendor_output.usage.or_else(|| header_usage(&response)))
            .with_stop_reason(vendor_output.stop_reason))
    }
}

fn header_usage(response: &InvokeModelOutput) -> Option<TokenUsage> {
    match (response.input_tokens, response.output_tokens) {
        (Some(input), Some(output)) => Some(TokenUsage::new(input, output)),
        _ => None,
    }
}

#[async_trait]
impl LanguageModel for BedrockLanguageModel {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    #[instrument(
        name = "bedrock.infer",
        skip_all,
        fields(model_id = %self.model_id, family = %self.family, batch_size = prompts.len())
    )]
    async fn infer(
        &self,
        prompts: &[String],
        overrides: Option<&InferenceOverrides>,
    ) -> Result<Vec<ScoredOutput>, BedrockError> {
        if let Some(overrides) = overrides {
            overrides.check_for(self.family)?;
        }
        if prompts.is_empty() {
            return Ok(Vec::new());
        }

        let params = self.call_params(overrides);
        let mut outputs = Vec::with_capacity(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            match self.infer_one(prompt, &params).await {
                Ok(output) => {
                    debug!(prompt_index = index, "Prompt completed");
                    outputs.push(output);
                }
                Err(e) => {
                    warn!(
                        prompt_index = index,
                        kind = e.kind(),
                        retryable = e.is_retryable(),
                        "Bedrock inference failed, aborting batch: {}",
                        e
                    );
                    return Err(e);
                }
            }
        }
        Ok(outputs)
    }
}

impl std::fmt::Debug for BedrockLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BedrockLanguageModel")
            .field("model_id", &self.model_id)
            .field("family", &self.family)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
