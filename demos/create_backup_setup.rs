//! Create a volume, a local repository and a nightly backup schedule, then
//! route failure alerts to a Slack webhook.
//!
//! Run:
//! `cargo run --example create_backup_setup -- <device> <mount-point> <slack-webhook-url>`
//!
//! Env vars: `ZEROBYTE_URL`, `ZEROBYTE_USERNAME`, `ZEROBYTE_PASSWORD`.

use serde_json::{Map, Value, json};
use zerobyte_client::models::{
    Backend, CompressionMode, CreateDestination, CreateRepository, CreateSchedule, CreateVolume,
    RepositoryConfig, RetentionPolicy, ScheduleNotifications,
};
use zerobyte_client::{Payload, ZerobyteClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [device, mount_point, webhook_url] = <[String; 3]>::try_from(args)
        .map_err(|_| "usage: create_backup_setup <device> <mount-point> <slack-webhook-url>")?;

    let client = ZerobyteClient::connect(
        std::env::var("ZEROBYTE_URL")?,
        std::env::var("ZEROBYTE_USERNAME")?,
        std::env::var("ZEROBYTE_PASSWORD")?,
    )?;

    let volume = client.volumes().create(&CreateVolume {
        name: "data".to_owned(),
        device,
        mount_point: mount_point.clone(),
        filesystem: "ext4".to_owned(),
        auto_remount: true,
        readonly: false,
        options: Vec::new(),
    })?;
    let volume_id = numeric_id(&volume, "volume")?;
    println!("volume {volume_id} created");

    let repository = client.repositories().create(&CreateRepository {
        name: "nightly".to_owned(),
        config: RepositoryConfig::new(Backend::Local).option("path", "/var/lib/zerobyte/nightly"),
        compression_mode: Some(CompressionMode::Auto),
    })?;
    let repository_name = repository["name"].as_str().unwrap_or("nightly").to_owned();
    println!("repository '{repository_name}' created");

    let schedules = client.backup_schedules();
    let schedule = schedules.create(
        volume_id,
        &repository_name,
        &CreateSchedule {
            name: "Nightly".to_owned(),
            schedule: "0 2 * * *".to_owned(),
            enabled: true,
            backup_paths: vec![mount_point],
            exclude_paths: Vec::new(),
            retention: Some(RetentionPolicy {
                keep_daily: Some(7),
                keep_weekly: Some(4),
                ..RetentionPolicy::default()
            }),
            tags: vec!["nightly".to_owned()],
        },
    )?;
    let schedule_id = numeric_id(&schedule, "schedule")?;
    println!("schedule {schedule_id} created");

    let mut config = Map::new();
    config.insert("webhookUrl".to_owned(), json!(webhook_url));
    let destination = client.notifications().create_destination(&CreateDestination {
        name: "Slack alerts".to_owned(),
        kind: "slack".to_owned(),
        config,
    })?;
    let destination_id = numeric_id(&destination, "destination")?;

    if let Payload::Json(result) = client.notifications().test_destination(destination_id)? {
        println!("test notification: {result}");
    }

    schedules.update_notifications(
        volume_id,
        &repository_name,
        schedule_id,
        &ScheduleNotifications {
            on_success: false,
            on_failure: true,
            destinations: vec![destination_id],
        },
    )?;
    println!("failures of schedule {schedule_id} now notify destination {destination_id}");
    Ok(())
}

fn numeric_id(record: &Value, what: &str) -> Result<u64, String> {
    record["id"]
        .as_u64()
        .ok_or_else(|| format!("{what} response has no numeric id: {record}"))
}
