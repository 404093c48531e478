//! Host registration for the Bedrock adapter
//!
//! Registration is always an explicit call; nothing registers on load.

use std::sync::Arc;
use tracing::info;

use super::error::BedrockError;
use super::provider::{BedrockLanguageModel, PROVIDER_NAME};
use crate::config::ModelConfig;
use crate::core::registry::{ModelFactory, ModelFuture, ProviderEntry, ProviderRegistry, global_registry};
use crate::core::traits::LanguageModel;

/// Routing priority of the Bedrock entry
pub const BEDROCK_PRIORITY: i32 = 10;

const BEDROCK_PATTERNS: &[&str] = &[
    r"^bedrock:",
    r"^(anthropic|mistral|cohere|meta\.llama|amazon\.titan)",
];

/// Model id patterns routed to the Bedrock adapter
pub fn bedrock_model_patterns() -> &'static [&'static str] {
    BEDROCK_PATTERNS
}

fn bedrock_factory() -> ModelFactory {
    Arc::new(|config: ModelConfig| -> ModelFuture {
        Box::pin(async move {
            let model = BedrockLanguageModel::new(config).await?;
            Ok(Box::new(model) as Box<dyn LanguageModel>)
        })
    })
}

/// Registry entry for the Bedrock adapter
pub fn bedrock_provider_entry() -> Result<ProviderEntry, BedrockError> {
    ProviderEntry::new(
        PROVIDER_NAME,
        BEDROCK_PATTERNS,
        BEDROCK_PRIORITY,
        bedrock_factory(),
    )
}

/// Register the adapter; returns `false` if it was already registered
pub fn register_bedrock_provider(registry: &mut ProviderRegistry) -> Result<bool, BedrockError> {
    if registry.contains(PROVIDER_NAME) {
        return Ok(false);
    }
    Ok(registry.register(bedrock_provider_entry()?))
}

/// Register the adapter with the process-wide registry
pub fn register_bedrock_provider_globally() -> Result<bool, BedrockError> {
    let registered = register_bedrock_provider(&mut global_registry().write())?;
    if registered {
        info!(provider = PROVIDER_NAME, "Bedrock provider registered globally");
    }
    Ok(registered)
}
