//! User entity representing an authenticated identity.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use tk_shared::config::UserRecord;

use crate::errors::{DomainError, DomainResult};

/// Role identifiers granted to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Regular authenticated user
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrator
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Identifier as carried in token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ROLE_USER" => Ok(Role::User),
            "ROLE_ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("Unknown role: {}", other))),
        }
    }
}

/// An authenticated user. Immutable once built; the password never leaves this value.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    name: String,
    email: String,
    password: String,
    roles: HashSet<Role>,
}

impl User {
    /// Creates a user without roles
    pub fn new(
        username: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            email: email.into(),
            password: password.into(),
            roles: HashSet::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Builds a user from a configured record, rejecting unknown role names
    pub fn from_record(username: impl Into<String>, record: &UserRecord) -> DomainResult<Self> {
        let roles = record
            .roles
            .iter()
            .map(|role| role.parse::<Role>())
            .collect::<DomainResult<HashSet<_>>>()?;

        Ok(Self::new(
            username,
            record.name.clone(),
            record.email.clone(),
            record.password.clone(),
        )
        .with_roles(roles))
    }

    /// Unique identity key, used as the token subject
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn roles(&self) -> &HashSet<Role> {
        &self.roles
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Role identifiers in a stable order
    pub fn role_names(&self) -> Vec<String> {
        let mut roles: Vec<Role> = self.roles.iter().copied().collect();
        roles.sort();
        roles.into_iter().map(|role| role.as_str().to_string()).collect()
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[hidden]")
            .field("roles", &self.role_names())
            .finish()
    }
}
