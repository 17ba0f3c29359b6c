//! Exchange of an MFA device id and token code for temporary session credentials.

use std::fmt;

use async_trait::async_trait;
use aws_sdk_sts::Client;
use aws_smithy_types::{date_time::Format, error::display::DisplayErrorContext};
use log::info;

use crate::error::{BoxError, Error, Result};

/// Temporary credentials issued for a single MFA-authenticated session.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    /// RFC 3339 timestamp, when the issuer reports one.
    pub expiration: Option<String>,
}

impl SessionCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
            expiration: None,
        }
    }
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

/// A remote service able to trade an MFA token code for session credentials.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn get_session_token(
        &self,
        device_id: &str,
        token_code: &str,
        duration: i32,
    ) -> std::result::Result<SessionCredentials, BoxError>;
}

/// Issues credentials through AWS STS `GetSessionToken`.
///
/// The long-term credentials used to sign the request are resolved by the SDK from the
/// ambient environment (environment variables, shared config and credentials files).
#[derive(Default)]
pub struct StsTokenIssuer;

#[async_trait]
impl TokenIssuer for StsTokenIssuer {
    async fn get_session_token(
        &self,
        device_id: &str,
        token_code: &str,
        duration: i32,
    ) -> std::result::Result<SessionCredentials, BoxError> {
        let config = aws_config::from_env().load().await;

        let output = Client::new(&config)
            .get_session_token()
            .duration_seconds(duration)
            .serial_number(device_id)
            .token_code(token_code)
            .send()
            .await
            .map_err(|e| DisplayErrorContext(e).to_string())?;

        let session = output.credentials().ok_or(Error::MissingCredentials)?;

        Ok(SessionCredentials {
            expiration: Some(session.expiration().fmt(Format::DateTime)?),
            ..SessionCredentials::new(
                session.access_key_id(),
                session.secret_access_key(),
                session.session_token(),
            )
        })
    }
}

/// Makes exactly one request to `issuer`; a rejected token code is not retried since the
/// same code cannot succeed twice.
pub async fn exchange(
    issuer: &dyn TokenIssuer,
    device_id: &str,
    token_code: &str,
    duration: i32,
) -> Result<SessionCredentials> {
    info!("Fetching credentials - Device: {device_id}, Duration: {duration}s");

    let credentials = issuer
        .get_session_token(device_id, token_code, duration)
        .await
        .map_err(Error::Exchange)?;

    if let Some(expiration) = &credentials.expiration {
        info!("Credentials expire at: {expiration}");
    }

    Ok(credentials)
}
