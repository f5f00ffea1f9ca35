//! Error handling
//!
//! Defines error types for the credential adapter and its supporting pieces.

pub mod types;

pub use types::*;
