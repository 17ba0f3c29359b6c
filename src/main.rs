//! AWS MFA Session Credentials
//!
//! Obtains temporary AWS credentials for an identity that requires MFA authentication.
//!
//! The program performs the following operations:
//! 1. Parses the token code and flags from the command line
//! 2. Reads the MFA device ARN from the `[default]` section of `~/.aws/credentials`
//! 3. Exchanges the device ARN and token code for session credentials through AWS STS
//! 4. Prints the credentials as shell exports and as a pasteable file section, or with
//!    `--save` writes them to the `[default-session]` section of the credentials file

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod app;
mod cli;
mod credentials;
mod error;
mod present;
mod profile;

use cli::Args;
use credentials::StsTokenIssuer;

#[tokio::main]
async fn main() -> ExitCode {
    // INFO by default; RUST_LOG overrides.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    match refresh(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn refresh(args: &Args) -> Result<()> {
    app::run(
        args,
        profile::default_credentials_path,
        &StsTokenIssuer,
        &mut std::io::stdout().lock(),
    )
    .await
}
