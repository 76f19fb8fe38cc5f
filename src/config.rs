use std::time::Duration;

use crate::session::Credentials;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings for [`crate::ZerobyteClient::new`].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub(crate) base_url: String,
    pub(crate) credentials: Credentials,
    pub(crate) auto_login: bool,
    pub(crate) timeout: Option<Duration>,
    pub(crate) user_agent: String,
}

impl ClientConfig {
    /// Creates a config that logs in at construction.
    ///
    /// `base_url` is the service root (for example `http://localhost:4096`);
    /// endpoint paths are rooted at `/api/v1/` beneath it.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::new(username, password),
            auto_login: true,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Whether the client logs in while being constructed. Defaults to `true`.
    #[must_use]
    pub fn auto_login(mut self, enabled: bool) -> Self {
        self.auto_login = enabled;
        self
    }

    /// Bounds each request. Without it reqwest's default timeout applies.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    pub fn is_auto_login(&self) -> bool {
        self.auto_login
    }
}
