//! Domain entities: the authenticated user and the claims issued for it.

pub mod token;
pub mod user;

pub use token::AccessClaims;
pub use user::{Role, User};
