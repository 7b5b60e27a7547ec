//! Token service module for JWT management
//!
//! This module handles all token-related operations including:
//! - HS256 key derivation from the configured secret
//! - Access token generation
//! - Token validation and verified claim extraction

mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use key_manager::{HmacKeyManager, MIN_SECRET_BYTES, SIGNING_ALGORITHM};
pub use service::TokenizationService;
