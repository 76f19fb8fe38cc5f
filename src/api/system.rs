use serde_json::Value;

use crate::ClientError;
use crate::transport::{Request, Transport};

/// `/api/v1/system` endpoints.
#[derive(Clone, Copy, Debug)]
pub struct System<'a> {
    transport: &'a Transport,
}

impl<'a> System<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Server version, platform and related details.
    pub fn info(&self) -> Result<Value, ClientError> {
        self.transport
            .execute(Request::get("/api/v1/system/info"))?
            .decode()
    }

    /// Downloads the restic password file. The server answers with plain text.
    pub fn download_restic_password(&self) -> Result<String, ClientError> {
        let payload = self
            .transport
            .execute(Request::get("/api/v1/system/download-restic-password"))?;
        Ok(payload.into_text())
    }
}
