use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::Url;
use serde::Serialize;

/// Username and password used for the login call.
///
/// The password is held in memory for the lifetime of the client and is
/// redacted from `Debug` output.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connection identity and authentication state for one client.
///
/// The session token itself lives in the HTTP client's cookie store; this type
/// only tracks whether the last login succeeded. The flag is atomic, so reads
/// from concurrent calls are safe, but `login`/`logout` are not serialized
/// against in-flight requests: a logout racing a request can leave
/// [`Session::is_authenticated`] out of step with the server-side session.
#[derive(Debug)]
pub struct Session {
    base_url: Url,
    credentials: Credentials,
    authenticated: AtomicBool,
}

impl Session {
    pub(crate) fn new(base_url: Url, credentials: Credentials) -> Self {
        Self {
            base_url,
            credentials,
            authenticated: AtomicBool::new(false),
        }
    }

    /// Base endpoint, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `true` only between a successful login and the next logout or `401`.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::Acquire)
    }

    pub(crate) fn set_authenticated(&self, value: bool) {
        self.authenticated.store(value, Ordering::Release);
    }
}
