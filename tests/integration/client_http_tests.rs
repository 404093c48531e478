//! HTTP client tests against a mock Bedrock runtime endpoint

use bedrock_extract::core::providers::bedrock::{AwsContext, BedrockClient};
use bedrock_extract::{
    BedrockError, BedrockLanguageModel, BedrockTransport, LanguageModel, OutputPayload, TokenUsage,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::fixtures::{self, prompts};
use crate::{assert_err, assert_ok};

const INVOKE_PATH: &str = r"^/model/anthropic\.claude-3-haiku-20240307-v1(%3A|:)0/invoke$";

fn client_for(server: &MockServer) -> BedrockClient {
    let context = AwsContext::from_static("AKIDEXAMPLE", "secret", Some("token".to_string()), "us-east-1");
    assert_ok!(BedrockClient::new(context, Some(&server.uri()), Duration::from_secs(5)))
}

#[tokio::test]
async fn test_invoke_model_sends_signed_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(INVOKE_PATH))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(header("x-amz-security-token", "token"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(body_json(json!({"inputText": "hello"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-amzn-bedrock-input-token-count", "3")
                .insert_header("x-amzn-bedrock-output-token-count", "7")
                .set_body_json(json!({"ok": true})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let output = assert_ok!(
        client
            .invoke_model(fixtures::ANTHROPIC_MODEL, json!({"inputText": "hello"}).to_string().into_bytes())
            .await
    );

    assert_eq!(serde_json::from_slice::<serde_json::Value>(&output.body).unwrap(), json!({"ok": true}));
    assert_eq!(output.input_tokens, Some(3));
    assert_eq!(output.output_tokens, Some(7));
}

#[tokio::test]
async fn test_authorization_header_scope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_ok!(client.invoke_model(fixtures::ANTHROPIC_MODEL, b"{}".to_vec()).await);

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let authorization = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
    assert!(authorization.contains("/us-east-1/bedrock/aws4_request"));
    assert!(authorization.contains("x-amz-security-token"));
}

async fn error_for(status: u16, error_type: Option<&str>, body: serde_json::Value) -> BedrockError {
    let server = MockServer::start().await;
    let mut response = ResponseTemplate::new(status).set_body_json(body);
    if let Some(error_type) = error_type {
        response = response.insert_header("x-amzn-ErrorType", error_type);
    }
    Mock::given(method("POST")).respond_with(response).mount(&server).await;

    let client = client_for(&server);
    assert_err!(client.invoke_model(fixtures::ANTHROPIC_MODEL, b"{}".to_vec()).await)
}

#[tokio::test]
async fn test_http_403_is_authentication() {
    let err = error_for(
        403,
        Some("AccessDeniedException:http://internal.amazon.com/coral/com.amazon.bedrock/"),
        json!({"message": "You don't have access to the model with the specified model ID."}),
    )
    .await;
    assert!(matches!(err, BedrockError::Authentication { .. }), "{:?}", err);

    let err = error_for(403, None, json!({"Message": "forbidden"})).await;
    assert!(matches!(err, BedrockError::Authentication { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_http_429_is_throttling() {
    let err = error_for(
        429,
        Some("ThrottlingException"),
        json!({"message": "Too many requests, please wait before trying again."}),
    )
    .await;
    assert!(matches!(err, BedrockError::Throttling { .. }), "{:?}", err);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_http_400_validation_is_api_error() {
    let err = error_for(
        400,
        Some("ValidationException:http://internal.amazon.com/coral/com.amazon.bedrock/"),
        json!({"message": "Malformed input request: #: extraneous key [foo] is not permitted"}),
    )
    .await;
    match err {
        BedrockError::Api { status, error_type, message } => {
            assert_eq!(status, 400);
            assert_eq!(error_type, "ValidationException");
            assert!(message.starts_with("Malformed input request"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_http_500_is_retryable_api_error() {
    let err = error_for(500, None, json!({"message": "internal"})).await;
    assert!(matches!(err, BedrockError::Api { status: 500, .. }), "{:?}", err);
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_connection_failure_is_network_error() {
    // a port nothing listens on
    let listener = assert_ok!(std::net::TcpListener::bind("127.0.0.1:0"));
    let uri = format!("http://{}", assert_ok!(listener.local_addr()));
    drop(listener);

    let context = AwsContext::from_static("AKID", "SECRET", None, "us-east-1");
    let client = assert_ok!(BedrockClient::new(context, Some(&uri), Duration::from_secs(2)));
    let err = assert_err!(client.invoke_model(fixtures::TITAN_MODEL, b"{}".to_vec()).await);
    assert!(matches!(err, BedrockError::Network { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_adapter_end_to_end_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(INVOKE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": "Paris"}],
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 1}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let config = fixtures::config_for(&format!("bedrock:{}", fixtures::ANTHROPIC_MODEL))
        .with_endpoint_url(server.uri());
    let model = assert_ok!(BedrockLanguageModel::new(config).await);

    let outputs = assert_ok!(
        model
            .infer(&prompts(&["Capital of France?", "Capital of France, again?"]), None)
            .await
    );
    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs[0].output, OutputPayload::Text("Paris".to_string()));
    assert_eq!(outputs[1].usage, Some(TokenUsage::new(12, 1)));
}
