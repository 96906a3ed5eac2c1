//! Client-facing authentication: the pooler plays the server role.
//!
//! The handshake challenges the connecting client according to the route's
//! configured [`AuthMode`], verifies the response against the route's
//! expected password, and finishes with AuthenticationOk or a typed
//! ErrorResponse before rejecting.

use rand::RngCore;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

use crate::auth::password::{constant_time_eq, md5_credential};
use crate::config::{AuthMode, RouteCredentials};
use crate::error::{AuthError, Result};
use crate::protocol::framing::{
    Message, read_message, write_authentication_cleartext, write_authentication_md5,
    write_authentication_ok, write_error_response,
};
use crate::protocol::messages::parse_password_message;

const SEVERITY_FATAL: &str = "FATAL";
// SQLSTATE codes emitted toward rejected clients.
const INVALID_PASSWORD: &str = "28P01";
const INVALID_AUTHORIZATION: &str = "28000";
const PROTOCOL_VIOLATION: &str = "08P01";
const INTERNAL_ERROR: &str = "XX000";

/// Authenticate a connecting client over `stream`.
///
/// `client_user` is the user name from the client's startup packet. On any
/// rejection an ErrorResponse has already been written; the caller is
/// expected to close the connection. A write failure means the connection
/// is unusable and surfaces as [`AuthError::Io`].
pub async fn authenticate_frontend<S>(
    stream: &mut S,
    client_user: &str,
    credentials: &RouteCredentials,
    mode: AuthMode,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match mode {
        AuthMode::None => {}
        AuthMode::ClearText => frontend_cleartext(stream, client_user, credentials).await?,
        AuthMode::Md5 => frontend_md5(stream, client_user, credentials).await?,
        AuthMode::Block => {
            warn!(
                user = client_user,
                route = %credentials.route_name(),
                "blocked user rejected"
            );
            write_error_response(stream, SEVERITY_FATAL, INVALID_AUTHORIZATION, "user blocked")
                .await?;
            return Err(AuthError::Blocked(client_user.to_string()));
        }
    }

    write_authentication_ok(stream).await
}

async fn frontend_cleartext<S>(
    stream: &mut S,
    client_user: &str,
    credentials: &RouteCredentials,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let expected = expected_password(stream, credentials).await?;

    write_authentication_cleartext(stream).await?;
    let response = wait_password_message(stream).await?;
    let token = read_password_token(stream, &response).await?;

    if !constant_time_eq(token, expected.as_bytes()) {
        return reject_password(stream, client_user).await;
    }
    Ok(())
}

async fn frontend_md5<S>(
    stream: &mut S,
    client_user: &str,
    credentials: &RouteCredentials,
) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let password = expected_password(stream, credentials).await?;

    // Fresh salt per handshake attempt; it has no meaning outside this one
    // hash computation.
    let mut salt = [0u8; 4];
    rand::rng().fill_bytes(&mut salt);

    write_authentication_md5(stream, &salt).await?;
    let response = wait_password_message(stream).await?;
    let token = read_password_token(stream, &response).await?;

    let expected = md5_credential(client_user, password, &salt);
    if !constant_time_eq(token, expected.as_bytes()) {
        return reject_password(stream, client_user).await;
    }
    Ok(())
}

/// Wait for a PasswordMessage, discarding anything else the client may have
/// buffered. The loop is unbounded on purpose: deadline enforcement belongs
/// to the caller (wrap the handshake in a timeout).
async fn wait_password_message<S>(stream: &mut S) -> Result<Message>
where
    S: AsyncRead + Unpin,
{
    loop {
        let msg = read_message(stream).await?;
        if msg.tag == b'p' {
            return Ok(msg);
        }
        debug!(
            "ignoring '{}' while waiting for PasswordMessage",
            msg.tag as char
        );
    }
}

async fn read_password_token<'m, S>(stream: &mut S, response: &'m Message) -> Result<&'m [u8]>
where
    S: AsyncWrite + Unpin,
{
    match parse_password_message(&response.payload) {
        Ok(token) => Ok(token),
        Err(err) => {
            write_error_response(
                stream,
                SEVERITY_FATAL,
                PROTOCOL_VIOLATION,
                "bad password message",
            )
            .await?;
            Err(err)
        }
    }
}

async fn expected_password<'c, S>(
    stream: &mut S,
    credentials: &'c RouteCredentials,
) -> Result<&'c str>
where
    S: AsyncWrite + Unpin,
{
    match credentials.user_password.as_deref() {
        Some(password) => Ok(password),
        None => {
            write_error_response(
                stream,
                SEVERITY_FATAL,
                INTERNAL_ERROR,
                "authentication is not configured",
            )
            .await?;
            Err(AuthError::MissingCredentials(credentials.route_name()))
        }
    }
}

async fn reject_password<S>(stream: &mut S, client_user: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    warn!(user = client_user, "incorrect password");
    write_error_response(
        stream,
        SEVERITY_FATAL,
        INVALID_PASSWORD,
        &format!("password authentication failed for user \"{client_user}\""),
    )
    .await?;
    Err(AuthError::InvalidPassword(client_user.to_string()))
}
