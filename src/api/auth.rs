use serde_json::Value;
use tracing::{info, warn};

use crate::ClientError;
use crate::models::{AuthResponse, AuthStatus, ChangePassword};
use crate::session::Credentials;
use crate::transport::{Payload, Request, Transport};

/// `/api/v1/auth` endpoints.
#[derive(Clone, Copy, Debug)]
pub struct Auth<'a> {
    transport: &'a Transport,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Creates a user. Fails with a validation error on short usernames or passwords.
    pub fn register(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request =
            Request::post("/api/v1/auth/register").json(&Credentials::new(username, password))?;
        self.transport.execute(request)?.decode()
    }

    /// Logs in and marks the session authenticated.
    ///
    /// The session cookie returned by the server is kept by the HTTP client and
    /// sent on every later call. On a `401` the session stays unauthenticated
    /// and the authentication error is returned.
    ///
    /// A successful status always yields `Ok`. The echoed profile is `None`
    /// when the body is empty, `null`, plain text or not an auth envelope.
    pub fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthResponse>, ClientError> {
        let request =
            Request::post("/api/v1/auth/login").json(&Credentials::new(username, password))?;
        let payload = self.transport.execute(request)?;
        self.transport.session().set_authenticated(true);
        info!(username, "logged in");
        Ok(login_profile(payload))
    }

    /// Logs out and marks the session unauthenticated.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.transport.execute(Request::post("/api/v1/auth/logout"))?;
        self.transport.session().set_authenticated(false);
        info!("logged out");
        Ok(())
    }

    /// Returns the principal the current session belongs to.
    pub fn me(&self) -> Result<AuthResponse, ClientError> {
        self.transport.execute(Request::get("/api/v1/auth/me"))?.decode()
    }

    /// Reports whether any user exists yet. Works without logging in.
    pub fn status(&self) -> Result<AuthStatus, ClientError> {
        self.transport
            .execute(Request::get("/api/v1/auth/status"))?
            .decode()
    }

    pub fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<Value, ClientError> {
        let request = Request::post("/api/v1/auth/change-password").json(&ChangePassword {
            current_password,
            new_password,
        })?;
        self.transport.execute(request)?.decode()
    }
}

fn login_profile(payload: Payload) -> Option<AuthResponse> {
    match payload {
        Payload::Json(Value::Null) | Payload::Text(_) | Payload::NoContent => None,
        Payload::Json(value) => match serde_json::from_value(value) {
            Ok(response) => Some(response),
            Err(error) => {
                warn!(%error, "login response is not an auth envelope");
                None
            }
        },
    }
}
