//! Configuration loading and validation

use bedrock_extract::config::env::{AWS_PROFILE, BEDROCK_MODEL_ID};
use bedrock_extract::{BedrockError, EnvSettings, InferenceOverrides, ModelConfig, Validate};
use std::io::Write;

use crate::{assert_err, assert_ok};

fn write_env_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = assert_ok!(tempfile::NamedTempFile::new());
    for line in lines {
        assert_ok!(writeln!(file, "{}", line));
    }
    file
}

#[test]
fn test_env_file_does_not_touch_process_env() {
    let marker = "BEDROCK_EXTRACT_TEST_MARKER_7F3A";
    let file = write_env_file(&[
        format!("{}=present", marker).as_str(),
        "BEDROCK_MODEL_ID=bedrock:anthropic.claude-3-haiku-20240307-v1:0",
    ]);

    let settings = assert_ok!(EnvSettings::from_path(file.path()));
    assert_eq!(settings.get(marker), Some("present"));
    assert!(std::env::var(marker).is_err());
}

#[test]
fn test_env_file_to_model_config() {
    let file = write_env_file(&[
        "# Bedrock settings",
        "AWS_PROFILE=extraction",
        "AWS_REGION=us-east-1",
        "BEDROCK_MODEL_ID=bedrock:us.anthropic.claude-3-5-sonnet-20240620-v1:0",
        "AWS_ACCESS_KEY_ID=AKIDEXAMPLE",
        "AWS_SECRET_ACCESS_KEY=wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
        "AWS_SESSION_TOKEN=session",
    ]);

    let settings = assert_ok!(EnvSettings::from_path(file.path()));
    assert_eq!(settings.profile(), Some("extraction"));
    assert_eq!(settings.get(AWS_PROFILE), Some("extraction"));
    assert!(settings.get(BEDROCK_MODEL_ID).is_some());

    let config = assert_ok!(ModelConfig::from_env_settings(&settings));
    assert_eq!(config.model_id, "bedrock:us.anthropic.claude-3-5-sonnet-20240620-v1:0");
    assert_eq!(config.region.as_deref(), Some("us-east-1"));
    assert_eq!(config.profile.as_deref(), Some("extraction"));
    assert_eq!(config.aws_access_key_id.as_deref(), Some("AKIDEXAMPLE"));
    assert_eq!(config.aws_session_token.as_deref(), Some("session"));
}

#[test]
fn test_env_file_with_bad_region_is_rejected() {
    let file = write_env_file(&[
        "AWS_REGION=moon-base",
        "BEDROCK_MODEL_ID=mistral.mistral-large-2402-v1:0",
    ]);
    let settings = assert_ok!(EnvSettings::from_path(file.path()));
    let err = assert_err!(ModelConfig::from_env_settings(&settings));
    assert!(matches!(err, BedrockError::Configuration { .. }));
}

#[test]
fn test_missing_env_file() {
    let err = assert_err!(EnvSettings::from_path("/nonexistent/bedrock-extract/.env"));
    assert!(matches!(err, BedrockError::Configuration { .. }));
}

#[test]
fn test_validation_rejects_bad_sampling() {
    let base = || ModelConfig::new("cohere.command-r-v1:0");

    for config in [
        base().with_temperature(5.01),
        base().with_temperature(-1.0),
        base().with_temperature(f32::INFINITY),
        base().with_top_p(0.0),
        base().with_top_p(1.5),
        base().with_max_output_tokens(0),
        base().with_timeout_seconds(0),
    ] {
        assert!(config.validate().is_err(), "{:?}", config);
        assert!(matches!(
            config.check(),
            Err(BedrockError::Configuration { .. })
        ));
    }

    assert!(base().validate().is_ok());
    assert!(InferenceOverrides::default().with_top_p(0.0).validate().is_err());
}

#[tokio::test]
async fn test_yaml_config_file() {
    let mut file = assert_ok!(tempfile::NamedTempFile::new());
    assert_ok!(write!(
        file,
        r#"
model_id: "bedrock:meta.llama3-70b-instruct-v1:0"
region: eu-west-1
profile: research
max_output_tokens: 2048
structured_output: true
response_schema:
  type: object
  required: [entities]
"#
    ));

    let config = assert_ok!(ModelConfig::from_yaml_file(file.path()).await);
    assert_eq!(config.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.max_output_tokens, 2048);
    assert_eq!(config.temperature, 0.2);
    assert_eq!(config.top_p, 0.9);
    assert!(config.structured_output);
    assert_eq!(config.response_schema.unwrap()["required"][0], "entities");
}

#[tokio::test]
async fn test_yaml_config_file_missing() {
    let err = assert_err!(ModelConfig::from_yaml_file("/nonexistent/model.yaml").await);
    assert!(matches!(err, BedrockError::Configuration { .. }));
}
