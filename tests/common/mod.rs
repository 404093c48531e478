//! Common test utilities for bedrock-extract
//!
//! Shared test infrastructure for the integration and e2e suites:
//! - Stub transports that stand in for the Bedrock runtime
//! - Vendor response fixtures and configuration factories
//! - Custom assertions and helpers
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, transport::EchoTransport};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let transport = EchoTransport::new();
//!     let config = fixtures::config_for("mistral.mistral-large-2402-v1:0");
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod transport;

// Re-export commonly used items
pub use transport::{EchoTransport, ScriptedTransport};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
