//! Rust and Python-facing client library for the Zerobyte backup management API.
//!
//! Public API layers:
//! - [`ZerobyteClient`]: composition root owning the session and exposing the
//!   resource façades (volumes, repositories, snapshots, backup schedules,
//!   notifications, system, auth).
//! - [`Transport`]: the single blocking request executor every façade uses.
//! - [`ClientError`]/[`ErrorKind`]: status-code driven error taxonomy shared by
//!   all operations.
//!
//! All calls are synchronous and perform exactly one HTTP round trip; there is
//! no retry, caching or pagination.

pub mod api;
mod client;
mod config;
mod error;
pub mod models;
mod path;
mod session;
mod transport;

/// Blocking Zerobyte API client.
pub use client::ZerobyteClient;
/// Client construction settings.
pub use config::ClientConfig;
/// Error type returned by all client operations.
pub use error::{ClientError, ErrorKind, RawResponse, classify};
/// Endpoint path templating.
pub use path::render_path;
pub use session::{Credentials, Session};
pub use transport::{Payload, Request, Transport};

#[cfg(feature = "python")]
mod python;
