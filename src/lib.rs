//! # bedrock-extract
//!
//! AWS Bedrock provider for text-extraction hosts. One uniform model
//! configuration and prompt batch in, one scored output per prompt out,
//! whichever Bedrock model family serves the request.
//!
//! ## Features
//!
//! - **Vendor normalization**: Anthropic Claude, Mistral, Cohere (chat and
//!   generate), Meta Llama (Llama 2 and Llama 3 templates) and Amazon Titan
//! - **Structured output**: native forced-tool schemas for Claude, prompt
//!   injection plus JSON parsing for everyone else
//! - **AWS credential chain**: explicit keys, named profiles, SSO, instance
//!   metadata, all through `aws-config`
//! - **Explicit registration**: an idempotent call adds the adapter to the
//!   host provider registry
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bedrock_extract::{BedrockLanguageModel, LanguageModel, ModelConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ModelConfig::new("bedrock:anthropic.claude-3-haiku-20240307-v1:0")
//!         .with_region("us-east-1");
//!     let model = BedrockLanguageModel::new(config).await?;
//!
//!     let outputs = model
//!         .infer(&["Name the capital of France.".to_string()], None)
//!         .await?;
//!     println!("{}", outputs[0].output);
//!     Ok(())
//! }
//! ```
//!
//! ## Through the registry
//!
//! ```rust,no_run
//! use bedrock_extract::{ModelConfig, create_model, register_bedrock_provider_globally};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     register_bedrock_provider_globally()?;
//!     let model = create_model(ModelConfig::new("mistral.mistral-large-2402-v1:0")).await?;
//!     println!("{}", model.name());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;

// Re-export main types
pub use config::{EnvSettings, InferenceOverrides, ModelConfig, Validate};
pub use core::providers::bedrock::{
    BedrockError, BedrockLanguageModel, BedrockModelFamily, BedrockTransport, InvokeModelOutput,
    PROVIDER_NAME, register_bedrock_provider, register_bedrock_provider_globally,
};
pub use core::registry::{
    ProviderEntry, ProviderRegistry, ProviderSummary, create_model, global_registry,
};
pub use core::traits::LanguageModel;
pub use core::types::{OutputPayload, ScoredOutput, TokenUsage};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
