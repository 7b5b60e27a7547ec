//! Configuration module
//!
//! - `auth` - signing secret, token lifetimes, cookie policy and configured users
//! - `environment` - environment detection and logging configuration
//!
//! [`AppConfig::load`] layers `config/default.*`, the environment specific file
//! and `TOKENIZATION__*` environment variables, later sources winning.

pub mod auth;
pub mod environment;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use auth::{AuthConfigProperties, CookieConfig, SameSite, UserRecord};
pub use environment::{Environment, LogFormat, LoggingConfig};

/// Prefix of environment variables overriding file configuration
pub const ENV_PREFIX: &str = "TOKENIZATION";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Complete application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// Authentication configuration
    pub auth: AuthConfigProperties,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the environment named in the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::from_env(), None)
    }

    /// Load configuration for `environment`, optionally layering an explicit file
    /// between the environment file and environment variables
    pub fn load_from(environment: Environment, file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::build(environment, file, None)
    }

    pub(crate) fn build(
        environment: Environment,
        file: Option<&Path>,
        env_source: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let logging = LoggingConfig::for_environment(environment);

        let mut builder = Config::builder()
            .set_default("environment", environment.to_string())?
            .set_default("logging.level", logging.level)?
            .set_default("logging.format", format_name(logging.format))?
            .set_default("logging.source_location", logging.source_location)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(environment.config_file()).required(false));

        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env_source),
            )
            .build()?;

        let app: AppConfig = settings.try_deserialize()?;
        tracing::debug!(
            environment = %app.environment,
            users = app.auth.users.len(),
            "configuration loaded"
        );
        Ok(app)
    }
}

fn format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Json => "json",
        LogFormat::Pretty => "pretty",
        LogFormat::Compact => "compact",
    }
}
