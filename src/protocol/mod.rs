//! PostgreSQL wire protocol primitives used during authentication.
//!
//! This module provides:
//! - Reading and writing length-prefixed protocol messages ([`framing`])
//! - Parsing authentication, password and error payloads ([`messages`])
//!
//! # Wire Protocol Overview
//!
//! PostgreSQL uses a message-based protocol where each message consists of:
//! - 1 byte: message type tag
//! - 4 bytes: message length (including these 4 bytes)
//! - N bytes: message payload
//!
//! The messages this crate produces and consumes:
//!
//! | Message | Tag | Payload |
//! |---|---|---|
//! | AuthenticationCleartextPassword | `R` | method code 3 |
//! | AuthenticationMD5Password | `R` | method code 5 + 4-byte salt |
//! | AuthenticationOk | `R` | method code 0 |
//! | PasswordMessage | `p` | password bytes, null-terminated |
//! | ErrorResponse | `E` | (field-code, cstring) pairs |

pub mod framing;
pub mod messages;

pub use framing::Message;
pub use messages::{ErrorFields, parse_auth_request, parse_error_response, parse_password_message};
