//! Model Configuration for Bedrock Models
//!
//! Resolves the vendor family of a Bedrock model id and holds the static
//! per-family capability table.

use super::error::BedrockError;

/// Scheme prefix a host uses to route a model id to this adapter
pub const BEDROCK_SCHEME: &str = "bedrock:";

/// Geography prefixes of cross-region inference profiles
const INFERENCE_PROFILE_PREFIXES: &[&str] = &["us.", "us-gov.", "eu.", "apac.", "jp.", "global."];

/// Cohere API flavour on Bedrock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CohereApi {
    /// Command R / R+ (`message` in, `text` out)
    Chat,
    /// Legacy Command (`prompt` in, `generations` out)
    Generate,
}

/// Prompt template for Meta Llama models
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlamaPromptFormat {
    Llama2,
    Llama3,
}

/// How a family satisfies a structured-output request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuredOutputMode {
    /// The schema goes into the request body and the vendor enforces it
    Native,
    /// The schema is written into the prompt and the reply is parsed as JSON
    PromptInjection,
}

/// Bedrock model families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedrockModelFamily {
    Anthropic,
    Mistral,
    Cohere(CohereApi),
    Meta(LlamaPromptFormat),
    Titan,
}

impl BedrockModelFamily {
    /// Resolve the family from a model id.
    ///
    /// Accepts raw ids (`anthropic.claude-3-haiku-20240307-v1:0`), ids with the
    /// `bedrock:` scheme, and cross-region profile ids (`us.meta.llama3-...`).
    pub fn from_model_id(model_id: &str) -> Result<Self, BedrockError> {
        let vendor_id = vendor_model_id(&normalize_model_id(model_id));
        let (vendor, model) = vendor_id
            .split_once('.')
            .unwrap_or((vendor_id.as_str(), ""));

        match vendor {
            "anthropic" => Ok(Self::Anthropic),
            "mistral" => Ok(Self::Mistral),
            "cohere" => {
                if model.starts_with("command-r") {
                    Ok(Self::Cohere(CohereApi::Chat))
                } else {
                    Ok(Self::Cohere(CohereApi::Generate))
                }
            }
            "meta" => {
                if model.starts_with("llama2") {
                    Ok(Self::Meta(LlamaPromptFormat::Llama2))
                } else {
                    Ok(Self::Meta(LlamaPromptFormat::Llama3))
                }
            }
            "amazon" if model.starts_with("titan-text") => Ok(Self::Titan),
            _ => Err(BedrockError::unsupported_vendor(model_id)),
        }
    }

    /// Structured-output strategy, fixed per family
    pub const fn structured_output_mode(&self) -> StructuredOutputMode {
        match self {
            Self::Anthropic => StructuredOutputMode::Native,
            Self::Mistral | Self::Cohere(_) | Self::Meta(_) | Self::Titan => {
                StructuredOutputMode::PromptInjection
            }
        }
    }

    /// Upper temperature bound Bedrock accepts for the family
    pub const fn max_temperature(&self) -> f32 {
        match self {
            Self::Cohere(_) => 5.0,
            Self::Anthropic | Self::Mistral | Self::Meta(_) | Self::Titan => 1.0,
        }
    }

    /// Vendor name as it appears in the model id
    pub const fn vendor(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Mistral => "mistral",
            Self::Cohere(_) => "cohere",
            Self::Meta(_) => "meta",
            Self::Titan => "amazon",
        }
    }
}

impl std::fmt::Display for BedrockModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.vendor())
    }
}

/// Strip the `bedrock:` scheme; the result is what gets sent to Bedrock
pub fn normalize_model_id(model_id: &str) -> String {
    model_id
        .trim()
        .strip_prefix(BEDROCK_SCHEME)
        .unwrap_or(model_id.trim())
        .to_string()
}

/// Strip a cross-region inference profile prefix for vendor detection
fn vendor_model_id(model_id: &str) -> String {
    INFERENCE_PROFILE_PREFIXES
        .iter()
        .find_map(|prefix| model_id.strip_prefix(prefix))
        .unwrap_or(model_id)
        .to_string()
}
