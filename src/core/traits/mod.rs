//! Core traits module
//!
//! Contains the abstract interface the host framework calls models through

pub mod language_model;

pub use language_model::*;
