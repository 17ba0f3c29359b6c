//! Command-line interface definitions.

use clap::Parser;

/// Establishes temporary AWS credentials where MFA authentication codes are required.
///
/// Given a token code obtained from an MFA device, requests session credentials for the
/// identity in the `[default]` section of `~/.aws/credentials`, using the device ARN stored
/// there as `mfa_device_id`. The credentials are printed, or with `--save` written to the
/// `[default-session]` section of the same file.
#[derive(Parser, Debug)]
#[command(author, version, about, override_usage = "mfa-session token-code [flags]")]
pub struct Args {
    /// Token code displayed by the MFA device; `help` prints this text
    #[arg(value_name = "TOKEN_CODE")]
    pub token_code: Option<String>,

    /// Save the obtained credentials to the [default-session] section of the credentials file
    #[arg(long)]
    pub save: bool,

    /// Session duration in seconds (900-129600)
    #[arg(short, long, env = "AWS_SESSION_DURATION", default_value = "43200")]
    pub duration: i32,
}

impl Args {
    /// The token code to use, or `None` when help should be shown instead.
    pub fn token_code(&self) -> Option<&str> {
        self.token_code
            .as_deref()
            .filter(|code| !code.is_empty() && *code != "help")
    }
}
