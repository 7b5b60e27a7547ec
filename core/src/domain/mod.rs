//! Domain layer containing the user identity and token claims.

pub mod entities;

pub use entities::{AccessClaims, Role, User};
