//! Integration tests for the tokenization service through the public API

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tk_core::{DomainError, Role, TokenError, TokenizationService, User};
    use tk_shared::config::{AuthConfigProperties, CookieConfig, SameSite, UserRecord};

    const SECRET: &str = "integration-secret-with-plenty-of-entropy-0123456789";

    fn configured() -> AuthConfigProperties {
        AuthConfigProperties::new(SECRET)
            .with_access_token_max_age_in_minutes(30)
            .with_cookie(CookieConfig::new("session").with_same_site(SameSite::Strict))
            .with_user(
                "user1",
                UserRecord::new("John Doe", "john@example.com", "password").with_role("ROLE_USER"),
            )
            .with_user(
                "admin",
                UserRecord::new("Jane Admin", "admin@example.com", "secret")
                    .with_role("ROLE_USER")
                    .with_role("ROLE_ADMIN"),
            )
    }

    fn configured_user(config: &AuthConfigProperties, username: &str) -> User {
        let record = config.user(username).expect("user is configured");
        User::from_record(username, record).expect("roles are known")
    }

    #[test]
    fn test_issue_for_configured_user() {
        let config = configured();
        let user = configured_user(&config, "admin");
        let service = TokenizationService::new(config).unwrap();

        let token = service.generate_access_token(&user).unwrap();

        assert!(service.validate_token(&token));
        assert_eq!(service.extract_username(&token).unwrap(), "admin");
        assert_eq!(
            service.extract_roles(&token).unwrap(),
            vec!["ROLE_USER".to_string(), "ROLE_ADMIN".to_string()]
        );

        let claims = service.extract_claims(&token).unwrap();
        assert_eq!(claims.name, "Jane Admin");
        assert_eq!(claims.email, "admin@example.com");
        assert!(claims.has_role(Role::Admin.as_str()));
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_unknown_role_in_configuration_is_rejected() {
        let record = UserRecord::new("Eve", "eve@example.com", "pw").with_role("ROLE_ROOT");

        let result = User::from_record("eve", &record);

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[test]
    fn test_services_sharing_a_secret_interoperate() {
        let config = configured();
        let user = configured_user(&config, "user1");
        let issuer = TokenizationService::new(config.clone()).unwrap();
        let verifier = TokenizationService::new(config).unwrap();

        let token = issuer.generate_access_token(&user).unwrap();

        assert!(verifier.validate_token(&token));
        assert_eq!(verifier.extract_username(&token).unwrap(), "user1");
    }

    #[test]
    fn test_expired_token_reports_expiry() {
        let config = configured().with_access_token_max_age_in_minutes(-5);
        let user = configured_user(&config, "user1");
        let service = TokenizationService::new(config).unwrap();

        let token = service.generate_access_token(&user).unwrap();

        assert!(!service.validate_token(&token));
        match service.extract_username(&token) {
            Err(DomainError::Token(err)) => {
                assert_eq!(err, TokenError::TokenExpired);
                assert_eq!(err.code(), "TOKEN_EXPIRED");
            }
            other => panic!("expected expiry, got {:?}", other),
        }
    }

    #[test]
    fn test_weak_secret_is_a_configuration_error() {
        let result = TokenizationService::new(AuthConfigProperties::new("tiny"));

        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(err.to_string().contains("32"));
    }

    #[test]
    fn test_cookie_policy_is_carried_through() {
        let service = TokenizationService::new(configured()).unwrap();

        let cookie = &service.config().cookie;
        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.same_site, SameSite::Strict);
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_shared_service_across_threads() {
        let config = configured();
        let user = configured_user(&config, "user1");
        let service = Arc::new(TokenizationService::new(config).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let service = Arc::clone(&service);
                let user = user.clone();
                std::thread::spawn(move || {
                    let token = service.generate_access_token(&user).unwrap();
                    service.validate_token(&token)
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
