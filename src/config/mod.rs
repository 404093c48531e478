//! Configuration management for the Bedrock adapter
//!
//! This module handles loading and validation of the model configuration.

pub mod env;
pub mod models;
pub mod validation;

pub use env::EnvSettings;
pub use models::*;
pub use validation::Validate;

use crate::core::providers::bedrock::error::BedrockError;
use crate::core::providers::bedrock::model_config::BedrockModelFamily;
use std::path::Path;
use tracing::{debug, info};

impl ModelConfig {
    /// Load configuration from a YAML file
    pub async fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, BedrockError> {
        let path = path.as_ref();
        info!("Loading model configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            BedrockError::configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            BedrockError::configuration(format!("Failed to parse config: {}", e))
        })?;

        config.check()?;

        debug!("Model configuration loaded successfully");
        Ok(config)
    }

    /// Build a configuration from `.env` settings.
    ///
    /// Explicit keys are only taken when both the access key and the secret
    /// are present, so a partial set falls through to the SDK chain.
    pub fn from_env_settings(settings: &EnvSettings) -> Result<Self, BedrockError> {
        let model_id = settings.model_id().ok_or_else(|| {
            BedrockError::configuration(format!("{} is not set", env::BEDROCK_MODEL_ID))
        })?;

        let mut config = Self::new(model_id);
        config.region = settings.region().map(str::to_string);
        config.profile = settings.profile().map(str::to_string);

        if let (Some(access_key), Some(secret_key)) =
            (settings.access_key_id(), settings.secret_access_key())
        {
            config = config.with_static_credentials(
                access_key,
                secret_key,
                settings.session_token().map(str::to_string),
            );
        }

        config.check()?;
        Ok(config)
    }

    /// [`Validate::validate`] with the failure as a configuration error
    pub fn check(&self) -> Result<(), BedrockError> {
        self.validate().map_err(BedrockError::configuration)
    }
}

impl InferenceOverrides {
    /// [`Validate::validate`] with the failure as a configuration error
    pub fn check(&self) -> Result<(), BedrockError> {
        self.validate().map_err(BedrockError::configuration)
    }

    /// Family-aware check, run before a batch is sent
    pub fn check_for(&self, family: BedrockModelFamily) -> Result<(), BedrockError> {
        self.validate_for(family).map_err(BedrockError::configuration)
    }
}
