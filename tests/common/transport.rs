//! Stub transports
//!
//! Stand-ins for the Bedrock runtime that record what they were sent.

use async_trait::async_trait;
use bedrock_extract::{BedrockError, BedrockTransport, InvokeModelOutput};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;

use super::fixtures::{prompt_of, response_for_request};

/// One recorded `InvokeModel` call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model_id: String,
    pub body: Value,
}

/// Replies to every request with its own prompt, in the vendor's shape
#[derive(Debug, Default)]
pub struct EchoTransport {
    calls: Mutex<Vec<RecordedCall>>,
}

impl EchoTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl BedrockTransport for EchoTransport {
    async fn invoke_model(
        &self,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<InvokeModelOutput, BedrockError> {
        let request: Value = serde_json::from_slice(&body)
            .map_err(|e| BedrockError::serialization(e.to_string()))?;
        let response = response_for_request(&request, &prompt_of(&request));
        self.calls.lock().push(RecordedCall {
            model_id: model_id.to_string(),
            body: request,
        });
        Ok(InvokeModelOutput::new(response.to_string()))
    }
}

/// Replies with queued results, in order
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<InvokeModelOutput, BedrockError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply with a JSON body
    pub fn reply_json(self, body: Value) -> Self {
        self.replies
            .lock()
            .push_back(Ok(InvokeModelOutput::new(body.to_string())));
        self
    }

    /// Queue a successful reply with a raw body
    pub fn reply_raw(self, body: &str) -> Self {
        self.replies
            .lock()
            .push_back(Ok(InvokeModelOutput::new(body.to_string())));
        self
    }

    /// Queue a failure
    pub fn fail(self, error: BedrockError) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl BedrockTransport for ScriptedTransport {
    async fn invoke_model(
        &self,
        model_id: &str,
        body: Vec<u8>,
    ) -> Result<InvokeModelOutput, BedrockError> {
        let request: Value = serde_json::from_slice(&body)
            .map_err(|e| BedrockError::serialization(e.to_string()))?;
        self.calls.lock().push(RecordedCall {
            model_id: model_id.to_string(),
            body: request,
        });
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(BedrockError::network("no scripted reply left")))
    }
}
