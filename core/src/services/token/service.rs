//! Main tokenization service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};
use tracing::{debug, info, warn};

use tk_shared::config::AuthConfigProperties;

use crate::domain::entities::token::AccessClaims;
use crate::domain::entities::user::User;
use crate::errors::{ConfigurationError, DomainError, DomainResult, TokenError};

use super::key_manager::HmacKeyManager;

/// Issues and verifies HS256 access tokens.
///
/// The service is stateless apart from key material derived once at
/// construction: a token is valid iff its signature verifies against that key,
/// it is well formed, and the current time is strictly before its `exp`.
/// There is no revocation list. After construction the service is `Send + Sync`
/// and can be shared behind an `Arc` without locking.
pub struct TokenizationService {
    config: AuthConfigProperties,
    keys: HmacKeyManager,
    validation: Validation,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl std::fmt::Debug for TokenizationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenizationService")
            .field("config", &self.config)
            .field("keys", &self.keys)
            .field("access_lifetime", &self.access_lifetime)
            .finish()
    }
}

impl TokenizationService {
    /// Creates the service, deriving and caching the signing keys
    ///
    /// # Arguments
    ///
    /// * `config` - Authentication configuration; owned by the service from here on
    ///
    /// # Returns
    ///
    /// * `Ok(TokenizationService)` - Ready for signing and verification
    /// * `Err(DomainError::Configuration)` - Secret too short for HS256, or a
    ///   lifetime that does not fit in a duration
    pub fn new(config: AuthConfigProperties) -> DomainResult<Self> {
        let keys = HmacKeyManager::from_secret(&config.secret)?;

        let access_lifetime = config
            .access_token_max_age()
            .ok_or(ConfigurationError::LifetimeOutOfRange {
                setting: "access_token_max_age_in_minutes",
                value: config.access_token_max_age_in_minutes,
            })?;
        let refresh_lifetime = config
            .refresh_token_max_age()
            .ok_or(ConfigurationError::LifetimeOutOfRange {
                setting: "refresh_token_max_age_days",
                value: config.refresh_token_max_age_days,
            })?;

        let mut validation = Validation::new(keys.algorithm());
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        if config.access_token_max_age_in_minutes <= 0 {
            warn!(
                minutes = config.access_token_max_age_in_minutes,
                "non-positive access token lifetime; issued tokens are expired on arrival"
            );
        }
        info!(
            algorithm = ?keys.algorithm(),
            access_token_minutes = config.access_token_max_age_in_minutes,
            "tokenization service initialized"
        );

        Ok(Self {
            config,
            keys,
            validation,
            access_lifetime,
            refresh_lifetime,
        })
    }

    /// Generates a signed access token for `user`
    ///
    /// Claims: `sub` (username), `name`, `email`, `roles`, `iat` and
    /// `exp = iat + access_token_max_age_in_minutes`.
    pub fn generate_access_token(&self, user: &User) -> DomainResult<String> {
        self.generate_access_token_at(user, Utc::now())
    }

    pub(crate) fn generate_access_token_at(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> DomainResult<String> {
        let claims = AccessClaims::for_user(user, issued_at, self.access_lifetime)?;
        let token = self.encode_jwt(&claims)?;
        debug!(subject = %claims.sub, exp = claims.exp, "issued access token");
        Ok(token)
    }

    /// Encodes claims into a compact JWS
    pub(crate) fn encode_jwt(&self, claims: &AccessClaims) -> DomainResult<String> {
        let header = Header::new(self.keys.algorithm());
        encode(&header, claims, self.keys.encoding_key())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Returns `true` iff the token is well formed, correctly signed and unexpired.
    ///
    /// Never fails: every rejection is reported as `false`.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.verify(token) {
            Ok(_) => true,
            Err(err) => {
                debug!(code = err.code(), error = %err, "access token rejected");
                false
            }
        }
    }

    /// Verifies the token and returns its subject
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The username the token was issued for
    /// * `Err(DomainError::Token)` - Malformed, badly signed or expired token
    pub fn extract_username(&self, token: &str) -> DomainResult<String> {
        self.extract_claims(token).map(|claims| claims.sub)
    }

    /// Verifies the token and returns its role identifiers
    pub fn extract_roles(&self, token: &str) -> DomainResult<Vec<String>> {
        self.extract_claims(token).map(|claims| claims.roles)
    }

    /// Verifies the token and returns the full claim set
    pub fn extract_claims(&self, token: &str) -> DomainResult<AccessClaims> {
        Ok(self.verify(token)?)
    }

    fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        // Anything without a parseable header is structurally invalid, whatever the decoder says.
        decode_header(token).map_err(|_| TokenError::InvalidTokenFormat)?;

        let token_data = decode::<AccessClaims>(token, self.keys.decoding_key(), &self.validation)?;
        let claims = token_data.claims;

        // The decoder accepts exp == now; validity requires now < exp.
        if claims.is_expired_at(Utc::now()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(claims)
    }

    /// Configured access token lifetime
    pub fn access_token_max_age(&self) -> Duration {
        self.access_lifetime
    }

    /// Configured refresh token lifetime
    pub fn refresh_token_max_age(&self) -> Duration {
        self.refresh_lifetime
    }

    /// Configuration the service was built with
    pub fn config(&self) -> &AuthConfigProperties {
        &self.config
    }
}
