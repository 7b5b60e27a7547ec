//! # Tokenization Core
//!
//! Stateless JWT issuance and validation for the authentication starter.
//! This crate contains the user and claims entities, the error taxonomy and
//! the [`TokenizationService`] that signs, validates and reads access tokens.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
