use reqwest::Url;
use tracing::debug;

use crate::ClientError;
use crate::api::{Auth, BackupSchedules, Notifications, Repositories, Snapshots, System, Volumes};
use crate::config::ClientConfig;
use crate::models::AuthResponse;
use crate::session::Session;
use crate::transport::{Payload, Request, Transport, ensure_trailing_slash};

/// Blocking client for the Zerobyte REST API.
///
/// Owns the session and the transport; resource façades are cheap borrowed
/// views obtained from the accessor methods:
///
/// ```no_run
/// use zerobyte_client::ZerobyteClient;
///
/// let client = ZerobyteClient::connect("http://localhost:4096", "admin", "password123")?;
/// let volumes = client.volumes().list()?;
/// let repositories = client.repositories().list(Some(1))?;
/// # Ok::<(), zerobyte_client::ClientError>(())
/// ```
///
/// The client is `Send + Sync` and may be shared across threads. Calling
/// [`Self::login`] or [`Self::logout`] while other threads have requests in
/// flight is not synchronized; see [`Session`].
#[derive(Debug)]
pub struct ZerobyteClient {
    transport: Transport,
}

impl ZerobyteClient {
    /// Builds a client from `config`, logging in first when auto-login is enabled.
    ///
    /// An authentication failure during auto-login is returned as
    /// [`ClientError::Authentication`] and no client is produced.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let parsed = Url::parse(&config.base_url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| ClientError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let session = Session::new(ensure_trailing_slash(parsed), config.credentials);
        let client = Self {
            transport: Transport::new(session, builder.build()?),
        };
        debug!(base_url = %client.base_url(), "client created");

        if config.auto_login {
            client.login()?;
        }
        Ok(client)
    }

    /// Builds a client and logs in with the given credentials.
    pub fn connect(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::new(ClientConfig::new(base_url, username, password))
    }

    /// Logs in with the credentials the client was configured with.
    pub fn login(&self) -> Result<Option<AuthResponse>, ClientError> {
        let credentials = self.transport.session().credentials();
        self.auth().login(&credentials.username, &credentials.password)
    }

    pub fn logout(&self) -> Result<(), ClientError> {
        self.auth().logout()
    }

    pub fn is_authenticated(&self) -> bool {
        self.transport.session().is_authenticated()
    }

    pub fn base_url(&self) -> &Url {
        self.transport.session().base_url()
    }

    pub fn username(&self) -> &str {
        &self.transport.session().credentials().username
    }

    pub fn session(&self) -> &Session {
        self.transport.session()
    }

    /// Sends a raw request through the shared transport.
    ///
    /// Useful for endpoints without a façade method.
    pub fn request(&self, request: Request) -> Result<Payload, ClientError> {
        self.transport.execute(request)
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(&self.transport)
    }

    pub fn volumes(&self) -> Volumes<'_> {
        Volumes::new(&self.transport)
    }

    pub fn repositories(&self) -> Repositories<'_> {
        Repositories::new(&self.transport)
    }

    pub fn snapshots(&self) -> Snapshots<'_> {
        Snapshots::new(&self.transport)
    }

    pub fn backup_schedules(&self) -> BackupSchedules<'_> {
        BackupSchedules::new(&self.transport)
    }

    pub fn notifications(&self) -> Notifications<'_> {
        Notifications::new(&self.transport)
    }

    pub fn system(&self) -> System<'_> {
        System::new(&self.transport)
    }
}
