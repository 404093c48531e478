//! Bedrock HTTP Client
//!
//! The [`BedrockTransport`] seam the adapter talks through, and its reqwest
//! implementation with AWS SigV4 signing.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error};

use super::credentials::AwsContext;
use super::error::{BedrockError, BedrockErrorMapper};
use super::region::runtime_endpoint;
use super::sigv4::{SigV4Signer, uri_encode};

const JSON_CONTENT_TYPE: &str = "application/json";
const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";
const INPUT_TOKENS_HEADER: &str = "x-amzn-bedrock-input-token-count";
const OUTPUT_TOKENS_HEADER: &str = "x-amzn-bedrock-output-token-count";

/// Raw result of one `InvokeModel` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeModelOutput {
    pub body: Vec<u8>,
    /// Token counts Bedrock reports in response headers, if any
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

impl InvokeModelOutput {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            body: body.into(),
            input_tokens: None,
            output_tokens: None,
        }
    }
}

/// Invocation of the Bedrock runtime `InvokeModel` operation
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BedrockTransport: Send + Sync {
    /// Send a serialized vendor body to `model_id` and return the raw reply
    async fn invoke_model(
        &self,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<InvokeModelOutput, BedrockError>;
}

/// Bedrock runtime client over reqwest
#[derive(Debug, Clone)]
pub struct BedrockClient {
    http: Client,
    context: AwsContext,
    signer: SigV4Signer,
    endpoint: String,
    error_mapper: BedrockErrorMapper,
}

impl BedrockClient {
    /// Create a new Bedrock client
    pub fn new(
        context: AwsContext,
        endpoint_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, BedrockError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            BedrockError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        let endpoint = endpoint_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| runtime_endpoint(&context.region));
        let signer = SigV4Signer::new(context.region.clone());

        Ok(Self {
            http,
            context,
            signer,
            endpoint,
            error_mapper: BedrockErrorMapper,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn region(&self) -> &str {
        self.signer.region()
    }

    /// `InvokeModel` URL; the model id is percent-encoded as one path segment
    pub fn build_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/invoke", self.endpoint, uri_encode(model_id))
    }

    async fn create_signed_headers(
        &self,
        url: &str,
        body: &[u8],
    ) -> Result<HeaderMap, BedrockError> {
        let credentials = self.context.signing_credentials().await?;

        let mut headers = BTreeMap::new();
        headers.insert("accept".to_string(), JSON_CONTENT_TYPE.to_string());
        headers.insert("content-type".to_string(), JSON_CONTENT_TYPE.to_string());

        let signed = self.signer.sign_request(
            &credentials,
            "POST",
            url,
            &headers,
            body,
            chrono::Utc::now(),
        )?;

        let mut header_map = HeaderMap::new();
        for (key, value) in signed {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                BedrockError::configuration(format!("Invalid header name '{}': {}", key, e))
            })?;
            let value = HeaderValue::from_str(&value).map_err(|e| {
                BedrockError::configuration(format!("Invalid value for header '{}': {}", key, e))
            })?;
            header_map.insert(name, value);
        }
        Ok(header_map)
    }
}

#[async_trait]
impl BedrockTransport for BedrockClient {
    async fn invoke_model(
        &self,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<InvokeModelOutput, BedrockError> {
        let url = self.build_url(model_id);
        debug!("Bedrock request to {}", url);
        debug!("Request body: {}", String::from_utf8_lossy(&body));

        let headers = self.create_signed_headers(&url, &body).await?;

        let response = self
            .http
            .post(&url)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("Bedrock transport error: {}", e);
                self.error_mapper.map_network_error(&e)
            })?;

        let status = response.status();
        let error_type = header_str(response.headers(), ERROR_TYPE_HEADER).map(str::to_string);
        let input_tokens = header_u32(response.headers(), INPUT_TOKENS_HEADER);
        let output_tokens = header_u32(response.headers(), OUTPUT_TOKENS_HEADER);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.error_mapper.map_network_error(&e))?;

        if !status.is_success() {
            let error_body = String::from_utf8_lossy(&bytes);
            error!("Bedrock API error: {} - {}", status.as_u16(), error_body);
            return Err(self.error_mapper.map_http_error(
                status.as_u16(),
                error_type.as_deref(),
                &error_body,
            ));
        }

        debug!("Response body: {}", String::from_utf8_lossy(&bytes));

        Ok(InvokeModelOutput {
            body: bytes.to_vec(),
            input_tokens,
            output_tokens,
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn header_u32(headers: &HeaderMap, name: &str) -> Option<u32> {
    header_str(headers, name).and_then(|v| v.trim().parse().ok())
}
