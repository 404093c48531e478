//! Configuration validation
//!
//! Validation logic for the model configuration and per-call overrides.

use super::models::{InferenceOverrides, ModelConfig};
use crate::core::providers::bedrock::model_config::BedrockModelFamily;
use crate::core::providers::bedrock::region::validate_region;
use tracing::debug;

/// Temperature ceiling when the family is not known
const DEFAULT_MAX_TEMPERATURE: f32 = 1.0;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ModelConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating model configuration for {}", self.model_id);

        if self.model_id.trim().is_empty() {
            return Err("Model id cannot be empty".to_string());
        }

        let max_temperature = BedrockModelFamily::from_model_id(&self.model_id)
            .map(|family| family.max_temperature())
            .unwrap_or(DEFAULT_MAX_TEMPERATURE);
        validate_temperature(self.temperature, max_temperature)?;
        validate_max_output_tokens(self.max_output_tokens)?;
        validate_top_p(self.top_p)?;

        if self.timeout_seconds == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(region) = &self.region {
            validate_region(region).map_err(|e| e.to_string())?;
        }

        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(
                    "Explicit AWS credentials need both an access key id and a secret access key"
                        .to_string(),
                );
            }
            _ => {}
        }

        if self.aws_session_token.is_some() && self.aws_access_key_id.is_none() {
            return Err("A session token requires explicit AWS credentials".to_string());
        }

        if let Some(endpoint) = &self.endpoint_url {
            let url = url::Url::parse(endpoint)
                .map_err(|e| format!("Endpoint URL '{}' is invalid: {}", endpoint, e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "Endpoint URL must use http:// or https://, got: {}",
                    url.scheme()
                ));
            }
        }

        if let Some(schema) = &self.response_schema {
            if !schema.is_object() {
                return Err("Response schema must be a JSON object".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for InferenceOverrides {
    fn validate(&self) -> Result<(), String> {
        self.validate_with(DEFAULT_MAX_TEMPERATURE)
    }
}

impl InferenceOverrides {
    /// Validate against the sampling ranges of one model family
    pub fn validate_for(&self, family: BedrockModelFamily) -> Result<(), String> {
        self.validate_with(family.max_temperature())
    }

    fn validate_with(&self, max_temperature: f32) -> Result<(), String> {
        if let Some(temperature) = self.temperature {
            validate_temperature(temperature, max_temperature)?;
        }
        if let Some(max_output_tokens) = self.max_output_tokens {
            validate_max_output_tokens(max_output_tokens)?;
        }
        if let Some(top_p) = self.top_p {
            validate_top_p(top_p)?;
        }
        if let Some(schema) = &self.response_schema {
            if !schema.is_object() {
                return Err("Response schema must be a JSON object".to_string());
            }
        }
        Ok(())
    }
}

fn validate_temperature(temperature: f32, max_temperature: f32) -> Result<(), String> {
    if !temperature.is_finite() || !(0.0..=max_temperature).contains(&temperature) {
        return Err(format!(
            "Temperature must be between 0.0 and {:.1}, got {}",
            max_temperature, temperature
        ));
    }
    Ok(())
}

fn validate_max_output_tokens(max_output_tokens: u32) -> Result<(), String> {
    if max_output_tokens == 0 {
        return Err("Max output tokens must be greater than 0".to_string());
    }
    Ok(())
}

fn validate_top_p(top_p: f32) -> Result<(), String> {
    if !top_p.is_finite() || top_p <= 0.0 || top_p > 1.0 {
        return Err(format!("Top-p must be in (0.0, 1.0], got {}", top_p));
    }
    Ok(())
}
