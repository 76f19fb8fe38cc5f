use serde_json::Value;

use crate::ClientError;
use crate::models::{CreateVolume, UpdateVolume};
use crate::path::render_path;
use crate::transport::{Payload, Request, Transport};

const VOLUMES: &str = "/api/v1/volumes";
const VOLUME: &str = "/api/v1/volumes/{volume_id}";
const VOLUME_MOUNT: &str = "/api/v1/volumes/{volume_id}/mount";
const VOLUME_UNMOUNT: &str = "/api/v1/volumes/{volume_id}/unmount";
const VOLUME_HEALTH_CHECK: &str = "/api/v1/volumes/{volume_id}/health-check";
const VOLUME_FILES: &str = "/api/v1/volumes/{volume_id}/files";

/// `/api/v1/volumes` endpoints. Volumes are addressed by numeric id.
#[derive(Clone, Copy, Debug)]
pub struct Volumes<'a> {
    transport: &'a Transport,
}

impl<'a> Volumes<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list(&self) -> Result<Value, ClientError> {
        self.call(Request::get(VOLUMES))
    }

    pub fn create(&self, volume: &CreateVolume) -> Result<Value, ClientError> {
        self.call(Request::post(VOLUMES).json(volume)?)
    }

    /// Checks that a volume definition is mountable without creating it.
    pub fn test_connection(&self, volume: &CreateVolume) -> Result<Value, ClientError> {
        self.call(Request::post("/api/v1/volumes/test-connection").json(volume)?)
    }

    pub fn get(&self, volume_id: u64) -> Result<Value, ClientError> {
        self.call(Request::get(volume_path(VOLUME, volume_id)?))
    }

    pub fn update(&self, volume_id: u64, changes: &UpdateVolume) -> Result<Value, ClientError> {
        self.call(Request::put(volume_path(VOLUME, volume_id)?).json(changes)?)
    }

    pub fn delete(&self, volume_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::delete(volume_path(VOLUME, volume_id)?))
    }

    pub fn mount(&self, volume_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::post(volume_path(VOLUME_MOUNT, volume_id)?))
    }

    pub fn unmount(&self, volume_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::post(volume_path(VOLUME_UNMOUNT, volume_id)?))
    }

    pub fn health_check(&self, volume_id: u64) -> Result<Payload, ClientError> {
        self.transport.execute(Request::post(volume_path(VOLUME_HEALTH_CHECK, volume_id)?))
    }

    /// Lists files inside a mounted volume, optionally below `path`.
    pub fn list_files(&self, volume_id: u64, path: Option<&str>) -> Result<Value, ClientError> {
        self.call(Request::get(volume_path(VOLUME_FILES, volume_id)?).query_opt("path", path))
    }

    /// Lists directories on the server host, for choosing a mount point.
    pub fn browse_filesystem(&self, path: Option<&str>) -> Result<Value, ClientError> {
        self.call(Request::get("/api/v1/volumes/browse-filesystem").query_opt("path", path))
    }

    pub fn rclone_remotes(&self) -> Result<Value, ClientError> {
        self.call(Request::get("/api/v1/volumes/rclone-remotes"))
    }

    fn call(&self, request: Request) -> Result<Value, ClientError> {
        self.transport.execute(request)?.decode()
    }
}

fn volume_path(template: &'static str, volume_id: u64) -> Result<String, ClientError> {
    let volume_id = volume_id.to_string();
    render_path(template, &[("volume_id", volume_id.as_str())])
}
