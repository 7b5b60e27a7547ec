//! Shared configuration and logging for the tokenization crates
//!
//! - Configuration types and layered loading
//! - Tracing subscriber initialisation

pub mod config;
pub mod logging;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfigProperties, CookieConfig, Environment, LogFormat, LoggingConfig,
    SameSite, UserRecord,
};
pub use logging::init_logging;
