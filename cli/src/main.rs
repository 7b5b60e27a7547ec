use std::process::ExitCode;

use clap::Parser;
use tk_cli::Cli;

fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tk_cli::run(cli)
}
