//! Error types for token handling and service configuration

use thiserror::Error;

/// Token-related errors
///
/// Every verification failure surfaces as one of these variants; callers that
/// only need a yes/no answer use `TokenizationService::validate_token` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Unsupported signing algorithm")]
    UnsupportedAlgorithm,

    #[error("Invalid claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Stable error code for outer layers
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::TokenExpired => "TOKEN_EXPIRED",
            TokenError::InvalidTokenFormat
            | TokenError::InvalidSignature
            | TokenError::UnsupportedAlgorithm
            | TokenError::InvalidClaims => "TOKEN_INVALID",
            TokenError::TokenGenerationFailed => "TOKEN_GENERATION_FAILED",
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, TokenError::TokenExpired)
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                TokenError::UnsupportedAlgorithm
            }
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
            _ => TokenError::InvalidTokenFormat,
        }
    }
}

/// Errors raised while building a service from configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing secret is {actual} bytes; HS256 requires at least {required}")]
    WeakSecret { actual: usize, required: usize },

    #[error("{setting} = {value} is outside the representable lifetime range")]
    LifetimeOutOfRange { setting: &'static str, value: i64 },
}
