//! The two authentication state machines of the pooler.
//!
//! - [`frontend`]: the pooler plays the *server* role toward a connecting
//!   client, challenging it per the route's configured mode.
//! - [`backend`]: the pooler plays the *client* role toward the real
//!   database server, answering whatever method the server requests.
//!
//! The machines are structurally mirror images sharing the [`password`]
//! hash utility, but their message handling is distinct: the frontend waits
//! only for PasswordMessage and discards everything else, the backend waits
//! for an authentication request or error and discards everything else.
//! Both run one handshake per connection with no shared mutable state; the
//! only suspension points are the reads and writes on the stream.
//!
//! # Supported Methods
//!
//! Cleartext password (method 3) and md5 (method 5). The following are not
//! supported and end the handshake:
//! - SCRAM-SHA-256 / SASL
//! - GSSAPI / Kerberos
//! - SSPI (Windows)
//! - Certificate authentication (handled at TLS layer)

pub mod backend;
pub mod frontend;
pub mod password;

pub use backend::authenticate_backend;
pub use frontend::authenticate_frontend;
