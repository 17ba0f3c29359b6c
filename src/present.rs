//! Terminal rendering of session credentials.

use std::io::{self, Write};

use crate::{
    credentials::SessionCredentials,
    profile::{ACCESS_KEY_ID_KEY, SECRET_ACCESS_KEY_KEY, SESSION_TOKEN_KEY, session_section},
};

/// Prints `credentials` as shell `export` statements and again as a credentials file
/// section ready to be pasted.
pub fn display(out: &mut dyn Write, credentials: &SessionCredentials) -> io::Result<()> {
    let SessionCredentials {
        access_key_id,
        secret_access_key,
        session_token,
        ..
    } = credentials;

    writeln!(out, "export AWS_ACCESS_KEY_ID={access_key_id}")?;
    writeln!(out, "export AWS_SECRET_ACCESS_KEY={secret_access_key}")?;
    writeln!(out, "export AWS_SESSION_TOKEN={session_token}")?;
    writeln!(out)?;
    writeln!(
        out,
        "Consider clearing your shell history (history -c) after pasting the above."
    )?;
    writeln!(out)?;
    writeln!(out, "[{}]", session_section())?;
    writeln!(out, "{ACCESS_KEY_ID_KEY} = {access_key_id}")?;
    writeln!(out, "{SECRET_ACCESS_KEY_KEY} = {secret_access_key}")?;
    writeln!(out, "{SESSION_TOKEN_KEY} = {session_token}")
}
