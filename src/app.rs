//! One invocation of the tool: look up the MFA device, exchange the token code, then
//! print or save the resulting session credentials.

use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::CommandFactory;

use crate::{
    cli::Args,
    credentials::{self, TokenIssuer},
    error, present, profile,
};

/// Runs the command described by `args` against the credentials file `locate` resolves.
///
/// Without a token code only the help text is written and `locate` is never called.
/// Otherwise every step must succeed in turn; the first failure is returned and nothing
/// after it runs.
pub async fn run(
    args: &Args,
    locate: impl FnOnce() -> error::Result<PathBuf>,
    issuer: &dyn TokenIssuer,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(token_code) = args.token_code() else {
        writeln!(out, "{}", Args::command().render_help())?;
        return Ok(());
    };

    let path = locate()?;
    let device_id = profile::lookup_device_id(&path)?;
    let session = credentials::exchange(issuer, &device_id, token_code, args.duration).await?;

    if args.save {
        profile::save_session_credentials(&path, &session)?;
        writeln!(out, "Session credentials saved to file {}", path.display())?;
    } else {
        present::display(out, &session)?;
    }

    Ok(())
}
