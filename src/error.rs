//! Error types for pgwire-poolauth.
//!
//! Every handshake outcome other than acceptance is represented by
//! [`AuthError`], which covers:
//! - Transport failures (read/write on the underlying connection)
//! - Protocol errors (malformed or out-of-flow messages)
//! - Credential failures (wrong password, blocked user, missing configuration)
//! - Server errors (the real backend returned an ErrorResponse)
//!
//! All variants are terminal for the current handshake: nothing is retried
//! internally. Whether to tear down the client connection, or to retry the
//! backend handshake against another server, is the caller's policy.

use thiserror::Error;

/// Error type for all pgwire-poolauth operations.
#[derive(Debug, Error, Clone)]
pub enum AuthError {
    /// Transport failure - the connection must be considered unusable.
    ///
    /// Note: `std::io::Error` is not `Clone`, so we store the message.
    #[error("io error: {0}")]
    Io(String),

    /// Protocol violation - malformed message or unexpected flow.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// The client supplied a password that does not match the route.
    #[error("invalid password for user '{0}'")]
    InvalidPassword(String),

    /// The route denies this identity outright.
    #[error("user '{0}' is blocked")]
    Blocked(String),

    /// The route has no password configured for the requested method.
    #[error("no password configured for route '{0}'")]
    MissingCredentials(String),

    /// The counterpart requested an authentication method we do not speak.
    #[error("unsupported authentication method: {0}")]
    UnsupportedMethod(i32),

    /// The backend server rejected the handshake with an ErrorResponse.
    #[error("backend error: {0}")]
    Backend(String),
}

impl AuthError {
    /// Returns `true` if this is a transport failure.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, AuthError::Io(_))
    }

    /// Returns `true` if this is a protocol violation.
    #[inline]
    pub fn is_protocol(&self) -> bool {
        matches!(self, AuthError::Protocol(_))
    }

    /// Returns `true` if the counterpart's credentials were rejected.
    #[inline]
    pub fn is_invalid_password(&self) -> bool {
        matches!(self, AuthError::InvalidPassword(_))
    }

    /// Returns `true` if the backend server reported the failure.
    #[inline]
    pub fn is_backend(&self) -> bool {
        matches!(self, AuthError::Backend(_))
    }

    /// Returns `true` if this error is likely transient and retryable
    /// against another connection.
    ///
    /// Credential and protocol errors typically require configuration
    /// changes and are not transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthError::Io(_))
    }
}

// Manual From impl since io::Error isn't Clone
impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Io(err.to_string())
    }
}

/// Result type alias for pgwire-poolauth operations.
pub type Result<T> = std::result::Result<T, AuthError>;
