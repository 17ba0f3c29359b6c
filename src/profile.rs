//! AWS Credentials File Access
//!
//! Reads the MFA device id from, and writes session credentials to, the shared AWS
//! credentials file. Two sections are involved:
//!
//! - `[default]`: the long-term IAM user identity. Besides the usual access key pair it
//!   carries the ARN of the MFA device under `mfa_device_id`. This section is never modified.
//! - `[default-session]`: the temporary credentials obtained with an MFA token code. It is
//!   created on the first save and its keys are overwritten in place afterwards.
//!
//! ## File Format
//!
//! ```ini
//! [default]
//! aws_access_key_id = AKIA...
//! aws_secret_access_key = ...
//! mfa_device_id = arn:aws:iam::999999999999:mfa/jane
//!
//! [default-session]
//! aws_access_key_id = ASIA...
//! aws_secret_access_key = ...
//! aws_session_token = ...
//! ```
//!
//! The whole file is loaded, changed in memory and written back in full. Values are kept
//! verbatim (`;` and `#` only start a comment at the beginning of a line); full-line comments
//! are not carried over by a save. Writes go to a temporary file next to the real file
//! (symlinks resolved) with the original permissions, which then replaces it, so a failed save
//! leaves the previous contents intact.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use configparser::ini::{Ini, WriteOptions};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    credentials::SessionCredentials,
    error::{Error, Result},
};

/// Section holding the long-term identity and the MFA device id.
pub const DEFAULT_SECTION: &str = "default";

/// Appended to [`DEFAULT_SECTION`] to name the section receiving session credentials.
pub const SESSION_SECTION_SUFFIX: &str = "-session";

pub const ACCESS_KEY_ID_KEY: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY_KEY: &str = "aws_secret_access_key";
pub const SESSION_TOKEN_KEY: &str = "aws_session_token";
pub const MFA_DEVICE_ID_KEY: &str = "mfa_device_id";

// configparser files keys found before the first header under its default section, which is
// itself called "default". Rename it so a real `[default]` header is kept as a section.
const PREAMBLE_SECTION: &str = "__preamble__";

/// Case-sensitive parser that leaves `;` and `#` inside values alone.
fn parser() -> Ini {
    let mut ini = Ini::new_cs();
    ini.set_default_section(PREAMBLE_SECTION);
    let no_inline_comments: &[char] = &[];
    ini.set_inline_comment_symbols(Some(no_inline_comments));
    ini
}

/// Name of the section session credentials are written to, i.e. `default-session`.
pub fn session_section() -> String {
    format!("{DEFAULT_SECTION}{SESSION_SECTION_SUFFIX}")
}

/// Location of the shared credentials file, `~/.aws/credentials`.
pub fn default_credentials_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|d| d.join(".aws").join("credentials"))
        .ok_or(Error::HomeDirectory)
}

/// In-memory copy of a credentials file.
pub struct CredentialsFile {
    path: PathBuf,
    ini: Ini,
}

impl CredentialsFile {
    /// Loads and parses the file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let mut ini = parser();
        ini.load(&path).map_err(|reason| Error::ConfigLoad {
            path: path.clone(),
            reason,
        })?;
        debug!("Loaded credentials file {}", path.display());

        Ok(Self { path, ini })
    }

    /// Returns the `mfa_device_id` of the `[default]` section, verbatim.
    pub fn mfa_device_id(&self) -> Result<String> {
        let section = self
            .ini
            .get_map_ref()
            .get(DEFAULT_SECTION)
            .ok_or_else(|| Error::SectionNotFound {
                section: DEFAULT_SECTION.to_owned(),
                path: self.path.clone(),
            })?;

        section
            .get(MFA_DEVICE_ID_KEY)
            .cloned()
            .flatten()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::KeyNotFound {
                key: MFA_DEVICE_ID_KEY.to_owned(),
                section: DEFAULT_SECTION.to_owned(),
                path: self.path.clone(),
            })
    }

    /// Sets the three session keys, creating the session section when missing.
    pub fn set_session(&mut self, credentials: &SessionCredentials) {
        let section = session_section();
        for (key, value) in [
            (ACCESS_KEY_ID_KEY, &credentials.access_key_id),
            (SECRET_ACCESS_KEY_KEY, &credentials.secret_access_key),
            (SESSION_TOKEN_KEY, &credentials.session_token),
        ] {
            self.ini.set(&section, key, Some(value.clone()));
        }
    }

    /// Writes the whole document back over the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let contents = self
            .ini
            .pretty_writes(&WriteOptions::new_with_params(true, 4, 1));

        self.replace_contents(&contents)
            .map_err(|source| Error::Save {
                path: self.path.clone(),
                source,
            })
    }

    fn replace_contents(&self, contents: &str) -> io::Result<()> {
        // Write through a symlinked credentials file rather than replacing the link.
        let target = fs::canonicalize(&self.path)?;
        let dir = target.parent().unwrap_or(Path::new("/"));
        let permissions = fs::metadata(&target)?.permissions();

        // Dropping the temporary file on any early return removes it.
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(contents.as_bytes())?;
        file.as_file().set_permissions(permissions)?;
        file.as_file().sync_all()?;
        file.persist(&target).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Finds the MFA device id in the `[default]` section of the file at `path`.
pub fn lookup_device_id(path: &Path) -> Result<String> {
    CredentialsFile::load(path)?.mfa_device_id()
}

/// Stores `credentials` in the session section of the existing file at `path`.
///
/// A file that cannot be loaded is an error; no new file is created in its place.
pub fn save_session_credentials(path: &Path, credentials: &SessionCredentials) -> Result<()> {
    let mut file = CredentialsFile::load(path)?;
    file.set_session(credentials);
    file.save()?;
    info!("Saved session credentials to {}", path.display());
    Ok(())
}
