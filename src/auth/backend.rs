//! Server-facing authentication: the pooler plays the client role.
//!
//! A newly established backend connection has already produced one
//! authentication-request message; this handshake answers it with the
//! route's storage credentials and consumes the server's verdict.

use tokio::io::{AsyncRead, AsyncWrite};
use tracing::debug;

use crate::auth::password::md5_credential;
use crate::config::RouteCredentials;
use crate::error::{AuthError, Result};
use crate::protocol::framing::{Message, read_message, write_password_message};
use crate::protocol::messages::{parse_auth_request, parse_error_response, parse_md5_salt};

/// Authenticate to the real backend server over `stream`.
///
/// `request` is the inbound `'R'` authentication-request that triggered this
/// call. Credentials are selected by the storage-over-route precedence rule
/// of [`RouteCredentials`]. On [`AuthError::Io`] the caller must treat the
/// backend connection as unusable.
pub async fn authenticate_backend<S>(
    stream: &mut S,
    request: &Message,
    credentials: &RouteCredentials,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    if request.tag != b'R' {
        return Err(AuthError::Protocol(format!(
            "expected authentication request, got '{}'",
            request.tag as char
        )));
    }

    let (method, rest) = parse_auth_request(&request.payload)?;
    match method {
        // AuthenticationOk
        0 => return Ok(()),
        // AuthenticationCleartextPassword
        3 => backend_cleartext(stream, credentials).await?,
        // AuthenticationMD5Password
        5 => {
            let salt = parse_md5_salt(rest)?;
            backend_md5(stream, credentials, &salt).await?;
        }
        other => return Err(AuthError::UnsupportedMethod(other)),
    }

    // Wait for the server's verdict, discarding intervening chatter such as
    // notices. A second distinct challenge is not a supported flow.
    loop {
        let msg = read_message(stream).await?;
        match msg.tag {
            b'R' => {
                let (method, _) = parse_auth_request(&msg.payload)?;
                if method != 0 {
                    return Err(AuthError::Protocol(format!(
                        "unexpected re-challenge (method {method}) after credentials were sent"
                    )));
                }
                return Ok(());
            }
            b'E' => return Err(AuthError::Backend(parse_error_response(&msg.payload))),
            tag => {
                debug!(
                    "ignoring '{}' while waiting for authentication result",
                    tag as char
                );
            }
        }
    }
}

async fn backend_cleartext<S>(stream: &mut S, credentials: &RouteCredentials) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    debug!(
        route = %credentials.route_name(),
        "backend requested clear-text authentication"
    );
    let password = credentials.backend_password()?;

    let mut payload = Vec::from(password.as_bytes());
    payload.push(0);
    write_password_message(stream, &payload).await
}

async fn backend_md5<S>(
    stream: &mut S,
    credentials: &RouteCredentials,
    salt: &[u8; 4],
) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    debug!(
        route = %credentials.route_name(),
        "backend requested md5 authentication"
    );
    let user = credentials.backend_user();
    let password = credentials.backend_password()?;

    let mut payload = md5_credential(user, password, salt).into_bytes();
    payload.push(0);
    write_password_message(stream, &payload).await
}
