//! Typed request bodies and the responses whose shape the client relies on.
//!
//! Field names are camelCase on the wire. Optional fields are omitted when
//! unset, so the `Update*` records only send what changes. Backend- and
//! destination-specific settings stay open-ended as JSON maps.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated principal echoed by login, register and `auth/me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub username: String,
    /// Any further profile fields the server sends.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope returned by the auth endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// `GET /api/v1/auth/status`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatus {
    /// `false` on a fresh install, before the first user registers.
    #[serde(default)]
    pub has_users: bool,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChangePassword<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

/// Body for `POST /api/v1/volumes` and `POST /api/v1/volumes/test-connection`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVolume {
    pub name: String,
    /// Device path or identifier, for example `/dev/sdb1`.
    pub device: String,
    pub mount_point: String,
    /// Filesystem type such as `ext4`, `ntfs` or `exfat`.
    pub filesystem: String,
    #[serde(default)]
    pub auto_remount: bool,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVolume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filesystem: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_remount: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// Storage backend of a restic repository.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Sftp,
    S3,
    R2,
    Azure,
    Gcs,
    Rest,
    Rclone,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionMode {
    Auto,
    Max,
    Off,
}

/// Backend selection plus its backend-specific fields (`path`, `bucket`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub backend: Backend,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl RepositoryConfig {
    pub fn new(backend: Backend) -> Self {
        Self {
            backend,
            options: Map::new(),
        }
    }

    /// Adds one backend-specific field.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepository {
    pub name: String,
    pub config: RepositoryConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_mode: Option<CompressionMode>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRepository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<RepositoryConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression_mode: Option<CompressionMode>,
}

/// Body for `POST /api/v1/repositories/{name}/restore`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    /// Directory the snapshot content is restored into.
    pub target: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    /// Restores the latest snapshot when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionPolicy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_hourly: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_daily: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_weekly: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_monthly: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_yearly: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedule {
    pub name: String,
    /// Cron expression, for example `0 2 * * *`.
    pub schedule: String,
    pub enabled: bool,
    pub backup_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention: Option<RetentionPolicy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchedule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention: Option<RetentionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Which notification destinations fire for a schedule, and when.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleNotifications {
    pub on_success: bool,
    pub on_failure: bool,
    pub destinations: Vec<u64>,
}

/// Repositories a schedule's snapshots are copied to after each run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMirrors {
    pub enabled: bool,
    pub repositories: Vec<u64>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderSchedules {
    pub schedule_ids: Vec<u64>,
}

/// Body for `POST /api/v1/notification-destinations`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreateDestination {
    pub name: String,
    /// Destination type such as `email`, `slack` or `webhook`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Type-specific settings (SMTP host, webhook URL, ...).
    #[serde(default)]
    pub config: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}
