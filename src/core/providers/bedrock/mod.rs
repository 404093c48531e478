//! AWS Bedrock Provider
//!
//! Vendor-normalizing adapter over the Bedrock runtime `InvokeModel`
//! operation. One uniform configuration and prompt batch in, one
//! [`ScoredOutput`](crate::core::types::ScoredOutput) per prompt out,
//! whichever model family serves the request.

// Core modules
pub mod client;
pub mod credentials;
pub mod error;
pub mod model_config;
mod provider;
pub mod region;
mod registration;
pub mod sigv4;
pub mod structured;

// Per-family request/response shapes
pub mod transformations;

// Re-export main types for external use
pub use client::{BedrockClient, BedrockTransport, InvokeModelOutput};
pub use credentials::{AwsContext, resolve_aws_context};
pub use error::{BedrockError, BedrockErrorMapper};
pub use model_config::{
    BEDROCK_SCHEME, BedrockModelFamily, CohereApi, LlamaPromptFormat, StructuredOutputMode,
    normalize_model_id,
};
pub use provider::{BedrockLanguageModel, PROVIDER_NAME};
pub use region::{AWS_REGIONS, DEFAULT_REGION, validate_region};
pub use registration::{
    BEDROCK_PRIORITY, bedrock_model_patterns, bedrock_provider_entry, register_bedrock_provider,
    register_bedrock_provider_globally,
};
pub use sigv4::SigV4Signer;
