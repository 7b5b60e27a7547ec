//! Tests for the tokenization service


use tk_shared::config::{AuthConfigProperties, CookieConfig, SameSite};

use crate::domain::entities::user::{Role, User};
use crate::services::token::TokenizationService;

pub(super) const SECRET: &str = "a-very-secure-secret-key-12345678901234567890";

pub(super) fn config_with_lifetime(minutes: i64) -> AuthConfigProperties {
    AuthConfigProperties::new(SECRET)
        .with_access_token_max_age_in_minutes(minutes)
        .with_refresh_token_max_age_days(7)
        .with_cookie(
            CookieConfig::new("token")
                .with_same_site(SameSite::Lax)
                .with_secure(true)
                .with_http_only(true)
                .with_path("/"),
        )
}

pub(super) fn create_test_service() -> TokenizationService {
    TokenizationService::new(config_with_lifetime(60)).expect("Failed to create tokenization service")
}

pub(super) fn test_user() -> User {
    User::new("user1", "John Doe", "john@example.com", "password").with_role(Role::User)
}
