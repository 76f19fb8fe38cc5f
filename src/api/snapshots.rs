use serde_json::Value;

use crate::ClientError;
use crate::models::RestoreRequest;
use crate::path::render_path;
use crate::transport::{Payload, Request, Transport};

const SNAPSHOTS: &str = "/api/v1/repositories/{repository}/snapshots";
const SNAPSHOT: &str = "/api/v1/repositories/{repository}/snapshots/{snapshot_id}";
const SNAPSHOT_FILES: &str = "/api/v1/repositories/{repository}/snapshots/{snapshot_id}/files";
const RESTORE: &str = "/api/v1/repositories/{repository}/restore";

/// Snapshot endpoints, scoped under a repository name.
#[derive(Clone, Copy, Debug)]
pub struct Snapshots<'a> {
    transport: &'a Transport,
}

impl<'a> Snapshots<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Lists snapshots, optionally only those taken by the backup `backup_id`.
    pub fn list(&self, repository: &str, backup_id: Option<&str>) -> Result<Value, ClientError> {
        let path = render_path(SNAPSHOTS, &[("repository", repository)])?;
        self.call(Request::get(path).query_opt("backupId", backup_id))
    }

    pub fn get(&self, repository: &str, snapshot_id: &str) -> Result<Value, ClientError> {
        self.call(Request::get(snapshot_path(SNAPSHOT, repository, snapshot_id)?))
    }

    pub fn delete(&self, repository: &str, snapshot_id: &str) -> Result<Payload, ClientError> {
        self.transport.execute(Request::delete(snapshot_path(SNAPSHOT, repository, snapshot_id)?))
    }

    pub fn list_files(
        &self,
        repository: &str,
        snapshot_id: &str,
        path: Option<&str>,
    ) -> Result<Value, ClientError> {
        let request = Request::get(snapshot_path(SNAPSHOT_FILES, repository, snapshot_id)?)
            .query_opt("path", path);
        self.call(request)
    }

    /// Restores snapshot content into `restore.target`.
    pub fn restore(
        &self,
        repository: &str,
        restore: &RestoreRequest,
    ) -> Result<Value, ClientError> {
        let path = render_path(RESTORE, &[("repository", repository)])?;
        self.call(Request::post(path).json(restore)?)
    }

    fn call(&self, request: Request) -> Result<Value, ClientError> {
        self.transport.execute(request)?.decode()
    }
}

fn snapshot_path(
    template: &'static str,
    repository: &str,
    snapshot_id: &str,
) -> Result<String, ClientError> {
    render_path(
        template,
        &[("repository", repository), ("snapshot_id", snapshot_id)],
    )
}
