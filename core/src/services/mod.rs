//! Services containing the token issuance and validation logic.

pub mod token;

// Re-export commonly used types
pub use token::{TokenizationService, MIN_SECRET_BYTES};
