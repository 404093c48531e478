//! End-to-end tests for bedrock-extract
//!
//! These tests call AWS Bedrock and require real credentials.
//! Run with: cargo test -- --ignored
//!
//! Required environment variables:
//! - BEDROCK_MODEL_ID: model to call, e.g. anthropic.claude-3-haiku-20240307-v1:0
//! - AWS credentials through any source the AWS SDK chain supports
//!
//! Optional:
//! - AWS_REGION / AWS_PROFILE

pub mod bedrock_live;
