//! HMAC key material for HS256 signing and verification

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::errors::ConfigurationError;

/// Signing algorithm used for every issued token
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Minimum secret length in bytes for HS256 (256 bits)
pub const MIN_SECRET_BYTES: usize = 32;

/// Encoding and decoding keys derived once from the configured secret
#[derive(Clone)]
pub struct HmacKeyManager {
    /// Key for signing JWTs
    encoding_key: EncodingKey,
    /// Key for verifying JWTs
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for HmacKeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKeyManager")
            .field("algorithm", &SIGNING_ALGORITHM)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl HmacKeyManager {
    /// Derives the key pair from `secret`
    ///
    /// # Returns
    ///
    /// * `Ok(HmacKeyManager)` - Keys derived successfully
    /// * `Err(ConfigurationError::WeakSecret)` - Secret shorter than [`MIN_SECRET_BYTES`]
    pub fn from_secret(secret: &str) -> Result<Self, ConfigurationError> {
        let bytes = secret.as_bytes();
        if bytes.len() < MIN_SECRET_BYTES {
            return Err(ConfigurationError::WeakSecret {
                actual: bytes.len(),
                required: MIN_SECRET_BYTES,
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    pub fn algorithm(&self) -> Algorithm {
        SIGNING_ALGORITHM
    }
}
