//! Authentication configuration: signing secret, token lifetimes, cookie policy
//! and the statically configured users.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Authentication settings handed to the tokenization service
#[derive(Clone, Deserialize, Serialize)]
pub struct AuthConfigProperties {
    /// HMAC signing secret (at least 32 bytes for HS256)
    pub secret: String,

    /// Access token lifetime in minutes; zero or negative issues already-expired tokens
    #[serde(default = "default_access_token_max_age")]
    pub access_token_max_age_in_minutes: i64,

    /// Refresh token lifetime in days
    #[serde(default = "default_refresh_token_max_age")]
    pub refresh_token_max_age_days: i64,

    /// Cookie policy used by the transport layer
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Statically configured users keyed by username
    #[serde(default)]
    pub users: HashMap<String, UserRecord>,
}

impl AuthConfigProperties {
    /// Create a configuration with the given secret and default lifetimes
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_max_age_in_minutes: default_access_token_max_age(),
            refresh_token_max_age_days: default_refresh_token_max_age(),
            cookie: CookieConfig::default(),
            users: HashMap::new(),
        }
    }

    /// Set the access token lifetime in minutes
    pub fn with_access_token_max_age_in_minutes(mut self, minutes: i64) -> Self {
        self.access_token_max_age_in_minutes = minutes;
        self
    }

    /// Set the refresh token lifetime in days
    pub fn with_refresh_token_max_age_days(mut self, days: i64) -> Self {
        self.refresh_token_max_age_days = days;
        self
    }

    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn with_users(mut self, users: HashMap<String, UserRecord>) -> Self {
        self.users = users;
        self
    }

    pub fn with_user(mut self, username: impl Into<String>, record: UserRecord) -> Self {
        self.users.insert(username.into(), record);
        self
    }

    /// Access token lifetime as a duration, `None` if the minutes overflow a duration
    pub fn access_token_max_age(&self) -> Option<Duration> {
        Duration::try_minutes(self.access_token_max_age_in_minutes)
    }

    /// Refresh token lifetime as a duration, `None` if the days overflow a duration
    pub fn refresh_token_max_age(&self) -> Option<Duration> {
        Duration::try_days(self.refresh_token_max_age_days)
    }

    /// Look up a configured user record
    pub fn user(&self, username: &str) -> Option<&UserRecord> {
        self.users.get(username)
    }
}

// The secret and user passwords never reach log output.
impl fmt::Debug for AuthConfigProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut usernames: Vec<&String> = self.users.keys().collect();
        usernames.sort();
        f.debug_struct("AuthConfigProperties")
            .field("secret", &"[hidden]")
            .field(
                "access_token_max_age_in_minutes",
                &self.access_token_max_age_in_minutes,
            )
            .field("refresh_token_max_age_days", &self.refresh_token_max_age_days)
            .field("cookie", &self.cookie)
            .field("users", &usernames)
            .finish()
    }
}

/// Cookie SameSite attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SameSite {
    #[default]
    #[serde(alias = "lax", alias = "Lax")]
    Lax,
    #[serde(alias = "strict", alias = "Strict")]
    Strict,
    #[serde(alias = "none", alias = "None")]
    None,
}

impl SameSite {
    /// Attribute value as written in a `Set-Cookie` header
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Lax => "Lax",
            SameSite::Strict => "Strict",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lax" => Ok(SameSite::Lax),
            "strict" => Ok(SameSite::Strict),
            "none" => Ok(SameSite::None),
            _ => Err(format!("Invalid SameSite value: {}", s)),
        }
    }
}

/// Cookie policy for carrying the access token
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    #[serde(default = "default_cookie_name")]
    pub name: String,

    /// SameSite attribute
    #[serde(default)]
    pub same_site: SameSite,

    /// Secure flag (HTTPS only)
    #[serde(default = "default_true")]
    pub secure: bool,

    /// HttpOnly flag
    #[serde(default = "default_true")]
    pub http_only: bool,

    /// Cookie path
    #[serde(default = "default_cookie_path")]
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: default_cookie_name(),
            same_site: SameSite::default(),
            secure: true,
            http_only: true,
            path: default_cookie_path(),
        }
    }
}

impl CookieConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// A user as declared in configuration
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    /// Display name
    pub name: String,

    pub email: String,

    pub password: String,

    /// Role identifiers such as `ROLE_USER`
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .field("roles", &self.roles)
            .finish()
    }
}

fn default_access_token_max_age() -> i64 {
    60
}

fn default_refresh_token_max_age() -> i64 {
    7
}

fn default_cookie_name() -> String {
    String::from("token")
}

fn default_cookie_path() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a-very-secure-secret-key-12345678901234567890";

    #[test]
    fn test_builder_sets_lifetimes() {
        let config = AuthConfigProperties::new(SECRET)
            .with_access_token_max_age_in_minutes(30)
            .with_refresh_token_max_age_days(14);

        assert_eq!(config.access_token_max_age(), Some(Duration::minutes(30)));
        assert_eq!(config.refresh_token_max_age(), Some(Duration::days(14)));
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_negative_lifetime_is_kept() {
        let config = AuthConfigProperties::new(SECRET).with_access_token_max_age_in_minutes(-1);
        assert_eq!(config.access_token_max_age(), Some(Duration::minutes(-1)));
    }

    #[test]
    fn test_oversized_lifetimes_have_no_duration() {
        let config = AuthConfigProperties::new(SECRET)
            .with_access_token_max_age_in_minutes(i64::MAX)
            .with_refresh_token_max_age_days(i64::MIN);

        assert_eq!(config.access_token_max_age(), None);
        assert_eq!(config.refresh_token_max_age(), None);
    }

    #[test]
    fn test_cookie_defaults() {
        let cookie = CookieConfig::default();
        assert_eq!(cookie.name, "token");
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert!(cookie.secure);
        assert!(cookie.http_only);
        assert_eq!(cookie.path, "/");
    }

    #[test]
    fn test_cookie_builder() {
        let cookie = CookieConfig::new("session")
            .with_same_site(SameSite::Strict)
            .with_secure(false)
            .with_http_only(false)
            .with_path("/api");

        assert_eq!(cookie.name, "session");
        assert_eq!(cookie.same_site.as_str(), "Strict");
        assert!(!cookie.secure);
        assert!(!cookie.http_only);
        assert_eq!(cookie.path, "/api");
    }

    #[test]
    fn test_same_site_parsing() {
        assert_eq!("LAX".parse::<SameSite>().unwrap(), SameSite::Lax);
        assert_eq!("strict".parse::<SameSite>().unwrap(), SameSite::Strict);
        assert_eq!(" None ".parse::<SameSite>().unwrap(), SameSite::None);
        assert!("sometimes".parse::<SameSite>().is_err());
    }

    #[test]
    fn test_same_site_deserializes_java_style_names() {
        let value: SameSite = serde_json::from_str("\"STRICT\"").unwrap();
        assert_eq!(value, SameSite::Strict);
        let value: SameSite = serde_json::from_str("\"lax\"").unwrap();
        assert_eq!(value, SameSite::Lax);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = serde_json::json!({
            "secret": SECRET,
            "users": {
                "user1": {
                    "name": "John Doe",
                    "email": "john@example.com",
                    "password": "password",
                    "roles": ["ROLE_USER"]
                }
            }
        });

        let config: AuthConfigProperties = serde_json::from_value(json).unwrap();
        assert_eq!(config.access_token_max_age_in_minutes, 60);
        assert_eq!(config.refresh_token_max_age_days, 7);
        assert_eq!(config.cookie, CookieConfig::default());

        let user = config.user("user1").unwrap();
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.roles, vec!["ROLE_USER".to_string()]);
        assert!(config.user("nobody").is_none());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfigProperties::new(SECRET).with_user(
            "user1",
            UserRecord::new("John Doe", "john@example.com", "hunter2").with_role("ROLE_USER"),
        );

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains(SECRET));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("user1"));
    }
}
