//! Integration tests for bedrock-extract
//!
//! These tests verify the interaction between the adapter, its transport,
//! the registry and configuration loading.

pub mod client_http_tests;
pub mod config_tests;
