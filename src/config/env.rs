//! `.env` file settings
//!
//! Reading a `.env` file is an explicit step. Values are collected into
//! [`EnvSettings`]; the process environment is never modified.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::core::providers::bedrock::error::BedrockError;

pub const AWS_PROFILE: &str = "AWS_PROFILE";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const BEDROCK_MODEL_ID: &str = "BEDROCK_MODEL_ID";
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Key/value pairs read from a `.env` file
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    values: HashMap<String, String>,
}

impl EnvSettings {
    /// Read a specific `.env` file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BedrockError> {
        let path = path.as_ref();
        info!("Loading environment settings from: {:?}", path);

        let iter = dotenvy::from_path_iter(path).map_err(|e| {
            BedrockError::configuration(format!(
                "Failed to open env file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::collect(iter)
    }

    /// Read `.env` from the current directory or its nearest ancestor
    pub fn from_dotenv() -> Result<Self, BedrockError> {
        let iter = dotenvy::from_filename_iter(".env").map_err(|e| {
            BedrockError::configuration(format!("Failed to find .env file: {}", e))
        })?;
        Self::collect(iter)
    }

    fn collect<I>(iter: I) -> Result<Self, BedrockError>
    where
        I: Iterator<Item = Result<(String, String), dotenvy::Error>>,
    {
        let mut values = HashMap::new();
        for item in iter {
            let (key, value) = item.map_err(|e| {
                BedrockError::configuration(format!("Failed to parse env file: {}", e))
            })?;
            values.insert(key, value);
        }
        debug!("Loaded {} environment settings", values.len());
        Ok(Self { values })
    }

    /// Value for `key`; empty values count as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn profile(&self) -> Option<&str> {
        self.get(AWS_PROFILE)
    }

    /// `AWS_REGION`, falling back to `AWS_DEFAULT_REGION`
    pub fn region(&self) -> Option<&str> {
        self.get(AWS_REGION).or_else(|| self.get(AWS_DEFAULT_REGION))
    }

    pub fn model_id(&self) -> Option<&str> {
        self.get(BEDROCK_MODEL_ID)
    }

    pub fn access_key_id(&self) -> Option<&str> {
        self.get(AWS_ACCESS_KEY_ID)
    }

    pub fn secret_access_key(&self) -> Option<&str> {
        self.get(AWS_SECRET_ACCESS_KEY)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.get(AWS_SESSION_TOKEN)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for EnvSettings {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Debug for EnvSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        f.debug_struct("EnvSettings").field("keys", &keys).finish()
    }
}
