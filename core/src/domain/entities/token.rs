//! Access token claims carried in the JWT payload.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::user::User;
use crate::errors::TokenError;

/// Claims structure for the access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (username)
    pub sub: String,

    /// Display name
    pub name: String,

    pub email: String,

    /// Role identifiers, e.g. `ROLE_USER`
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl AccessClaims {
    /// Creates claims for `user` issued at `issued_at` and valid for `lifetime`
    ///
    /// A zero or negative `lifetime` yields claims that are already expired.
    /// An expiry outside the representable date range fails with
    /// `TokenError::TokenGenerationFailed`.
    pub fn for_user(
        user: &User,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
    ) -> Result<Self, TokenError> {
        let expiry = issued_at
            .checked_add_signed(lifetime)
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: user.username().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            roles: user.role_names(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        })
    }

    /// Expired iff `now` is not strictly before the expiration
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|value| value == role)
    }
}
