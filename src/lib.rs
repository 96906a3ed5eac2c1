#![warn(
    clippy::all,
    clippy::cargo,
    clippy::perf,
    clippy::style,
    clippy::correctness,
    clippy::suspicious
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions
)]

pub mod auth;
pub mod config;
pub mod error;
pub mod protocol;

pub use auth::{authenticate_backend, authenticate_frontend};
pub use config::{AuthMode, RouteCredentials};
pub use error::{AuthError, Result};
pub use protocol::Message;
