//! Error types surfaced by every step of a session credential refresh.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by a [`TokenIssuer`](crate::credentials::TokenIssuer).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not determine home directory")]
    HomeDirectory,

    /// The credentials file is missing, unreadable or not valid INI.
    #[error("Could not read from credentials file {}: {reason}", .path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("{section} section not found in {}", .path.display())]
    SectionNotFound { section: String, path: PathBuf },

    /// Also raised when the key is present but its value is empty.
    #[error("{key} key not found in {section} section of {}", .path.display())]
    KeyNotFound {
        key: String,
        section: String,
        path: PathBuf,
    },

    /// Displayed exactly as the issuer reported it.
    #[error(transparent)]
    Exchange(BoxError),

    #[error("No credentials returned")]
    MissingCredentials,

    #[error("Failed to write credentials file {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
