use std::sync::Arc;

use crate::error::{AuthError, Result};

/// Client-facing authentication mode, selected per route by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Admit without a challenge.
    None,
    /// AuthenticationCleartextPassword challenge.
    ClearText,
    /// AuthenticationMD5Password challenge with a fresh salt.
    Md5,
    /// Deny the identity outright, regardless of credentials.
    Block,
}

/// Credential material for one route, read-only during authentication.
///
/// A route maps a requested (database, user) pair to a backend and its
/// credential policy. Handshakes only ever borrow this snapshot; config
/// reload must swap in a new snapshot (see [`RouteCredentials::into_shared`])
/// rather than mutate one in flight.
#[derive(Debug, Clone)]
pub struct RouteCredentials {
    /// Database name of the route, used in diagnostics.
    pub database: String,
    /// Nominal user of the route.
    pub user: String,
    /// Password an incoming client is checked against. Also the fallback
    /// password toward the backend when no storage password is set.
    pub user_password: Option<String>,
    /// Identity override used when authenticating to the real backend.
    pub storage_user: Option<String>,
    pub storage_password: Option<String>,
}

impl RouteCredentials {
    pub fn new(database: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            user: user.into(),
            user_password: None,
            storage_user: None,
            storage_password: None,
        }
    }

    /// Wrap into a reference-counted snapshot for sharing across handshakes.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// "database.user", as routes are named in logs and errors.
    pub fn route_name(&self) -> String {
        format!("{}.{}", self.database, self.user)
    }

    /// User to present to the real backend: the storage user overrides the
    /// route's nominal user.
    pub fn backend_user(&self) -> &str {
        self.storage_user.as_deref().unwrap_or(&self.user)
    }

    /// Password to present to the real backend: storage password, else the
    /// route's user password. Neither configured is a configuration error
    /// that ends the handshake.
    pub fn backend_password(&self) -> Result<&str> {
        self.storage_password
            .as_deref()
            .or(self.user_password.as_deref())
            .ok_or_else(|| AuthError::MissingCredentials(self.route_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RouteCredentials {
        RouteCredentials::new("db", "app")
    }

    #[test]
    fn backend_password_prefers_storage() {
        let mut c = route();
        c.user_password = Some("user-pw".into());
        c.storage_password = Some("storage-pw".into());
        assert_eq!(c.backend_password().unwrap(), "storage-pw");
    }

    #[test]
    fn backend_password_falls_back_to_user_password() {
        let mut c = route();
        c.user_password = Some("user-pw".into());
        assert_eq!(c.backend_password().unwrap(), "user-pw");
    }

    #[test]
    fn backend_password_missing_is_config_error() {
        let err = route().backend_password().unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials(_)));
        assert!(err.to_string().contains("db.app"));
    }

    #[test]
    fn backend_user_prefers_storage() {
        let mut c = route();
        assert_eq!(c.backend_user(), "app");
        c.storage_user = Some("storage".into());
        assert_eq!(c.backend_user(), "storage");
    }
}
