//! Shared helpers for the wiremock-backed integration tests.
//!
//! The client is blocking, so every call into it runs on tokio's blocking pool
//! while the mock server keeps serving on the async runtime.

#![allow(dead_code)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerobyte_client::{ClientConfig, ZerobyteClient};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "password123";
pub const SESSION_COOKIE: &str = "zerobyte_session=abc123";

/// Runs `work` on the blocking pool and returns its result.
pub async fn blocking<F, T>(work: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .expect("blocking task panicked")
}

/// Mounts a login endpoint that accepts the test credentials and sets a session cookie.
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({"username": USERNAME, "password": PASSWORD})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("{SESSION_COOKIE}; Path=/; HttpOnly"))
                .set_body_json(json!({
                    "success": true,
                    "user": {"id": 1, "username": USERNAME}
                })),
        )
        .mount(server)
        .await;
}

/// Connects with auto-login against a server that has [`mount_login`] mounted.
pub fn connect(base_url: &str) -> ZerobyteClient {
    ZerobyteClient::connect(base_url, USERNAME, PASSWORD).expect("login succeeds")
}

/// Builds a client that has not logged in.
pub fn offline(base_url: &str) -> ZerobyteClient {
    ZerobyteClient::new(ClientConfig::new(base_url, USERNAME, PASSWORD).auto_login(false))
        .expect("valid config")
}
