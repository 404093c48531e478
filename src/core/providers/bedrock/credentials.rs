//! Credential and region resolution
//!
//! Explicit keys from the model configuration win. Everything else goes
//! through the AWS SDK default chain (environment, shared profile files, SSO,
//! container and instance metadata), honoring a configured profile name.

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use tracing::{debug, warn};

use super::error::BedrockError;
use super::region::DEFAULT_REGION;
use super::sigv4::SigningCredentials;
use crate::config::ModelConfig;

const EXPLICIT_PROVIDER_NAME: &str = "bedrock-extract";

/// Credentials source and region for one adapter
#[derive(Debug, Clone)]
pub struct AwsContext {
    pub credentials: SharedCredentialsProvider,
    pub region: String,
}

impl AwsContext {
    /// Context from static keys, without touching the SDK chain
    pub fn from_static(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
        region: impl Into<String>,
    ) -> Self {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            session_token,
            None,
            EXPLICIT_PROVIDER_NAME,
        );
        Self {
            credentials: SharedCredentialsProvider::new(credentials),
            region: region.into(),
        }
    }

    /// Fetch credentials for signing one request
    pub async fn signing_credentials(&self) -> Result<SigningCredentials, BedrockError> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to resolve AWS credentials");
                BedrockError::authentication(format!("Failed to resolve AWS credentials: {}", e))
            })?;

        Ok(SigningCredentials {
            access_key_id: credentials.access_key_id().to_string(),
            secret_access_key: credentials.secret_access_key().to_string(),
            session_token: credentials.session_token().map(str::to_string),
        })
    }
}

/// Resolve credentials and region for a model configuration.
///
/// Region order: the configuration, then the SDK chain, then
/// [`DEFAULT_REGION`].
pub async fn resolve_aws_context(config: &ModelConfig) -> Result<AwsContext, BedrockError> {
    let explicit = explicit_credentials(config)?;

    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }
    if let Some(region) = &config.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(credentials) = explicit {
        loader = loader.credentials_provider(credentials);
    }
    let sdk_config = loader.load().await;

    let region = sdk_config
        .region()
        .map(|r| r.as_ref().to_string())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let credentials = sdk_config.credentials_provider().ok_or_else(|| {
        BedrockError::authentication("No AWS credentials provider could be configured")
    })?;

    debug!(
        region = %region,
        profile = config.profile.as_deref().unwrap_or("default"),
        explicit_keys = config.aws_access_key_id.is_some(),
        "Resolved AWS context"
    );

    Ok(AwsContext {
        credentials,
        region,
    })
}

fn explicit_credentials(config: &ModelConfig) -> Result<Option<Credentials>, BedrockError> {
    match (&config.aws_access_key_id, &config.aws_secret_access_key) {
        (Some(access_key), Some(secret_key)) => Ok(Some(Credentials::new(
            access_key.clone(),
            secret_key.clone(),
            config.aws_session_token.clone(),
            None,
            EXPLICIT_PROVIDER_NAME,
        ))),
        (None, None) => Ok(None),
        _ => Err(BedrockError::configuration(
            "Explicit AWS credentials need both an access key id and a secret access key",
        )),
    }
}
