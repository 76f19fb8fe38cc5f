use serde_json::Value;

use crate::ClientError;
use crate::models::{
    CreateSchedule, ReorderSchedules, ScheduleMirrors, ScheduleNotifications, UpdateSchedule,
};
use crate::path::render_path;
use crate::transport::{Payload, Request, Transport};

const SCHEDULES: &str = "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules";
const SCHEDULES_REORDER: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/reorder";
const VOLUME_SCHEDULES: &str = "/api/v1/volumes/{volume_id}/backup-schedules";
const SCHEDULE: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}";
const SCHEDULE_RUN_NOW: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/run-now";
const SCHEDULE_STOP: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/stop";
const SCHEDULE_FORGET: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/forget";
const SCHEDULE_NOTIFICATIONS: &str = "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/notifications";
const SCHEDULE_MIRRORS: &str =
    "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/mirrors";
const SCHEDULE_MIRROR_COMPATIBILITY: &str = "/api/v1/volumes/{volume_id}/repositories/{repository}/backup-schedules/{schedule_id}/mirror-compatibility";

/// Backup schedule endpoints.
///
/// Schedules are nested: every path carries the volume id and the repository
/// identifier the schedule backs up between.
#[derive(Clone, Copy, Debug)]
pub struct BackupSchedules<'a> {
    transport: &'a Transport,
}

impl<'a> BackupSchedules<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub fn list(&self, volume_id: u64, repository: &str) -> Result<Value, ClientError> {
        self.call(Request::get(scope_path(SCHEDULES, volume_id, repository)?))
    }

    pub fn create(
        &self,
        volume_id: u64,
        repository: &str,
        schedule: &CreateSchedule,
    ) -> Result<Value, ClientError> {
        self.call(Request::post(scope_path(SCHEDULES, volume_id, repository)?).json(schedule)?)
    }

    pub fn get(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Value, ClientError> {
        let path = schedule_path(SCHEDULE, volume_id, repository, schedule_id)?;
        self.call(Request::get(path))
    }

    pub fn update(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
        changes: &UpdateSchedule,
    ) -> Result<Value, ClientError> {
        let path = schedule_path(SCHEDULE, volume_id, repository, schedule_id)?;
        self.call(Request::put(path).json(changes)?)
    }

    pub fn delete(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::delete(path))
    }

    /// Lists schedules of a volume across all of its repositories.
    pub fn list_for_volume(&self, volume_id: u64) -> Result<Value, ClientError> {
        let volume_id = volume_id.to_string();
        let path = render_path(VOLUME_SCHEDULES, &[("volume_id", volume_id.as_str())])?;
        self.call(Request::get(path))
    }

    /// Starts a backup immediately, outside the cron schedule.
    pub fn run_now(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE_RUN_NOW, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::post(path))
    }

    /// Stops a running backup.
    pub fn stop(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE_STOP, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::post(path))
    }

    /// Applies the schedule's retention policy with `restic forget`.
    pub fn forget(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE_FORGET, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::post(path))
    }

    pub fn notifications(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Value, ClientError> {
        let path = schedule_path(SCHEDULE_NOTIFICATIONS, volume_id, repository, schedule_id)?;
        self.call(Request::get(path))
    }

    pub fn update_notifications(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
        notifications: &ScheduleNotifications,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE_NOTIFICATIONS, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::put(path).json(notifications)?)
    }

    pub fn mirrors(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Value, ClientError> {
        let path = schedule_path(SCHEDULE_MIRRORS, volume_id, repository, schedule_id)?;
        self.call(Request::get(path))
    }

    pub fn update_mirrors(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
        mirrors: &ScheduleMirrors,
    ) -> Result<Payload, ClientError> {
        let path = schedule_path(SCHEDULE_MIRRORS, volume_id, repository, schedule_id)?;
        self.transport.execute(Request::put(path).json(mirrors)?)
    }

    /// Reports which repositories can receive mirrored snapshots of this schedule.
    pub fn mirror_compatibility(
        &self,
        volume_id: u64,
        repository: &str,
        schedule_id: u64,
    ) -> Result<Value, ClientError> {
        let path = schedule_path(
            SCHEDULE_MIRROR_COMPATIBILITY,
            volume_id,
            repository,
            schedule_id,
        )?;
        self.call(Request::get(path))
    }

    pub fn reorder(
        &self,
        volume_id: u64,
        repository: &str,
        order: &ReorderSchedules,
    ) -> Result<Payload, ClientError> {
        let path = scope_path(SCHEDULES_REORDER, volume_id, repository)?;
        self.transport.execute(Request::post(path).json(order)?)
    }

    fn call(&self, request: Request) -> Result<Value, ClientError> {
        self.transport.execute(request)?.decode()
    }
}

fn scope_path(
    template: &'static str,
    volume_id: u64,
    repository: &str,
) -> Result<String, ClientError> {
    let volume_id = volume_id.to_string();
    render_path(
        template,
        &[("volume_id", volume_id.as_str()), ("repository", repository)],
    )
}

fn schedule_path(
    template: &'static str,
    volume_id: u64,
    repository: &str,
    schedule_id: u64,
) -> Result<String, ClientError> {
    let volume_id = volume_id.to_string();
    let schedule_id = schedule_id.to_string();
    render_path(
        template,
        &[
            ("volume_id", volume_id.as_str()),
            ("repository", repository),
            ("schedule_id", schedule_id.as_str()),
        ],
    )
}
