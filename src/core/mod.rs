//! Core functionality
//!
//! The model contract, output types, the provider registry and the provider
//! implementations.

pub mod providers;
pub mod registry;
pub mod traits;
pub mod types;
