//! Language model contract
//!
//! The interface a text-extraction host uses to run prompt batches, whatever
//! backend serves them.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::config::InferenceOverrides;
use crate::core::providers::bedrock::error::BedrockError;
use crate::core::types::ScoredOutput;

/// A model that turns a batch of prompts into scored outputs
///
/// # Contract
///
/// - The returned vector has one entry per prompt, in prompt order.
/// - An empty batch returns an empty vector without contacting the backend.
/// - A failure is returned as an error, never as a missing or placeholder
///   output.
#[async_trait]
pub trait LanguageModel: Send + Sync + Debug {
    /// Stable provider name, as registered with the host
    fn name(&self) -> &'static str;

    /// Model id the backend is invoked with
    fn model_id(&self) -> &str;

    /// Run inference for every prompt in the batch
    async fn infer(
        &self,
        prompts: &[String],
        overrides: Option<&InferenceOverrides>,
    ) -> Result<Vec<ScoredOutput>, BedrockError>;
}
