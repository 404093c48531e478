//! Provider implementations
//!
//! Each provider adapts one model backend to the
//! [`LanguageModel`](crate::core::traits::LanguageModel) contract.

pub mod bedrock;
