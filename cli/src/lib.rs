//! `tokenctl` - operator CLI for the tokenization service
//!
//! Subcommands:
//! - `issue`: sign an access token for a configured user
//! - `validate`: report whether a token is currently valid
//! - `whoami`: print the subject of a valid token
//! - `claims`: print the verified claim set as JSON

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use tk_core::{TokenizationService, User};
use tk_shared::config::{AppConfig, Environment};
use tk_shared::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "tokenctl")]
#[command(version, about = "Issue and inspect HS256 access tokens", long_about = None)]
pub struct Cli {
    /// Extra configuration file layered over config/default and config/<environment>
    #[arg(long, short = 'c', global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Environment to load; defaults to ENVIRONMENT / ENV / RUST_ENV
    #[arg(long = "env", global = true, value_name = "ENVIRONMENT")]
    pub environment: Option<Environment>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Sign an access token for a user listed under auth.users
    Issue {
        /// Username to issue the token for
        username: String,
    },

    /// Print "valid" or "invalid"; exits non-zero when invalid
    Validate {
        /// Compact JWS to check
        token: String,
    },

    /// Print the username a valid token was issued for
    Whoami {
        /// Compact JWS to read
        token: String,
    },

    /// Print the verified claims as JSON
    Claims {
        /// Compact JWS to read
        token: String,
    },
}

/// Load configuration, initialise logging, build the service and run the command
pub fn run(cli: Cli) -> Result<ExitCode> {
    let environment = cli.environment.unwrap_or_else(Environment::from_env);
    let config = AppConfig::load_from(environment, cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Err(err) = init_logging(&config.logging) {
        eprintln!("tokenctl: logging already initialized: {err}");
    }
    info!(environment = %config.environment, "configuration loaded");

    let service =
        TokenizationService::new(config.auth).context("Failed to build tokenization service")?;

    let stdout = std::io::stdout();
    execute(&cli.command, &service, &mut stdout.lock())
}

/// Run one command against an initialised service, writing results to `out`
pub fn execute<W: Write>(
    command: &Command,
    service: &TokenizationService,
    out: &mut W,
) -> Result<ExitCode> {
    match command {
        Command::Issue { username } => {
            let record = service
                .config()
                .user(username)
                .ok_or_else(|| anyhow!("No configured user named '{username}'"))?;
            let user = User::from_record(username.as_str(), record)
                .with_context(|| format!("Invalid configuration for user '{username}'"))?;

            let token = service.generate_access_token(&user)?;
            debug!(subject = %username, "token issued from CLI");
            writeln!(out, "{token}")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { token } => {
            if service.validate_token(token) {
                writeln!(out, "valid")?;
                Ok(ExitCode::SUCCESS)
            } else {
                writeln!(out, "invalid")?;
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Whoami { token } => {
            let username = service.extract_username(token).context("Token rejected")?;
            writeln!(out, "{username}")?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Claims { token } => {
            let claims = service.extract_claims(token).context("Token rejected")?;
            writeln!(out, "{}", serde_json::to_string_pretty(&claims)?)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
