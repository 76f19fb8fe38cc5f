//! Façade path and payload plumbing against a mock server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zerobyte_client::Payload;
use zerobyte_client::models::{
    Backend, CompressionMode, CreateDestination, CreateRepository, CreateSchedule, CreateVolume,
    RepositoryConfig, RestoreRequest, RetentionPolicy, ScheduleNotifications,
};

use common::{blocking, connect, mount_login, offline};

#[tokio::test]
async fn list_volumes_after_login() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/volumes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "volume1"},
            {"id": 2, "name": "volume2"}
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let volumes = blocking(move || connect(&uri).volumes().list())
        .await
        .expect("list succeeds");
    assert_eq!(volumes.as_array().map(Vec::len), Some(2));
    assert_eq!(volumes[0]["name"], "volume1");
}

#[tokio::test]
async fn create_volume_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/volumes"))
        .and(body_json(json!({
            "name": "my-backup",
            "device": "/dev/sdb1",
            "mountPoint": "/mnt/backup",
            "filesystem": "ext4",
            "autoRemount": true,
            "readonly": false,
            "options": []
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 3, "name": "my-backup"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let created = blocking(move || {
        offline(&uri).volumes().create(&CreateVolume {
            name: "my-backup".to_owned(),
            device: "/dev/sdb1".to_owned(),
            mount_point: "/mnt/backup".to_owned(),
            filesystem: "ext4".to_owned(),
            auto_remount: true,
            readonly: false,
            options: Vec::new(),
        })
    })
    .await
    .expect("create succeeds");
    assert_eq!(created["id"], 3);
}

#[tokio::test]
async fn repositories_are_filtered_by_volume_client_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "local", "volumeId": 1},
            {"name": "offsite", "volumeId": 2},
            {"name": "archive", "volumeId": 1},
            {"name": "legacy"}
        ])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (all, for_volume, none) = blocking(move || {
        let client = offline(&uri);
        let all = client.repositories().list(None).expect("list succeeds");
        let for_volume = client.repositories().list(Some(1)).expect("list succeeds");
        let none = client.repositories().list(Some(42)).expect("list succeeds");
        (all, for_volume, none)
    })
    .await;

    assert_eq!(all.len(), 4);
    let names: Vec<_> = for_volume.iter().map(|repo| repo["name"].clone()).collect();
    assert_eq!(names, vec![json!("local"), json!("archive")]);
    assert!(none.is_empty());
}

#[tokio::test]
async fn create_repository_and_run_doctor_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repositories"))
        .and(body_json(json!({
            "name": "my backups",
            "compressionMode": "max",
            "config": {"backend": "s3", "bucket": "restic", "endpoint": "s3.example.com"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"name": "my backups"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/my%20backups/doctor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let doctor = blocking(move || {
        let client = offline(&uri);
        client
            .repositories()
            .create(&CreateRepository {
                name: "my backups".to_owned(),
                config: RepositoryConfig::new(Backend::S3)
                    .option("bucket", "restic")
                    .option("endpoint", "s3.example.com"),
                compression_mode: Some(CompressionMode::Max),
            })
            .expect("create succeeds");
        client.repositories().doctor("my backups")
    })
    .await
    .expect("doctor succeeds");
    assert_eq!(doctor, Payload::Json(json!({"success": true})));
}

#[tokio::test]
async fn snapshot_restore_returns_payload_unchanged() {
    let server = MockServer::start().await;
    let restored = json!({
        "success": true,
        "filesRestored": 1204,
        "details": {"target": "/restore", "warnings": []}
    });
    Mock::given(method("POST"))
        .and(path("/api/v1/repositories/local/restore"))
        .and(body_json(json!({
            "target": "/restore",
            "include": ["/home"],
            "exclude": ["/home/*/.cache"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(restored.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let response = blocking(move || {
        offline(&uri).snapshots().restore(
            "local",
            &RestoreRequest {
                target: "/restore".to_owned(),
                include: vec!["/home".to_owned()],
                exclude: vec!["/home/*/.cache".to_owned()],
                snapshot_id: None,
            },
        )
    })
    .await
    .expect("restore succeeds");
    assert_eq!(response, restored);
}

#[tokio::test]
async fn snapshot_listing_passes_optional_filters_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/local/snapshots"))
        .and(query_param("backupId", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"short_id": "abc123"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/repositories/local/snapshots/abc123/files"))
        .and(query_param("path", "/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"files": []})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (snapshots, files) = blocking(move || {
        let client = offline(&uri);
        let snapshots = client
            .snapshots()
            .list("local", Some("daily"))
            .expect("list succeeds");
        let files = client
            .snapshots()
            .list_files("local", "abc123", Some("/data"))
            .expect("files succeed");
        (snapshots, files)
    })
    .await;
    assert_eq!(snapshots[0]["short_id"], "abc123");
    assert_eq!(files, json!({"files": []}));
}

#[tokio::test]
async fn schedules_are_addressed_under_volume_and_repository() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/volumes/1/repositories/2/backup-schedules"))
        .and(body_json(json!({
            "name": "Daily Backup",
            "schedule": "0 2 * * *",
            "enabled": true,
            "backupPaths": ["/home", "/etc"],
            "excludePaths": ["/home/*/.cache"],
            "retention": {"keepLast": 7, "keepDaily": 7, "keepWeekly": 4, "keepMonthly": 12}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/volumes/1/repositories/2/backup-schedules/5/run-now"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({"started": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/volumes/1/repositories/2/backup-schedules/5/notifications"))
        .and(body_json(json!({"onSuccess": false, "onFailure": true, "destinations": [1, 2]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let (created, started, linked) = blocking(move || {
        let client = offline(&uri);
        let schedules = client.backup_schedules();
        let created = schedules
            .create(
                1,
                "2",
                &CreateSchedule {
                    name: "Daily Backup".to_owned(),
                    schedule: "0 2 * * *".to_owned(),
                    enabled: true,
                    backup_paths: vec!["/home".to_owned(), "/etc".to_owned()],
                    exclude_paths: vec!["/home/*/.cache".to_owned()],
                    retention: Some(RetentionPolicy {
                        keep_last: Some(7),
                        keep_daily: Some(7),
                        keep_weekly: Some(4),
                        keep_monthly: Some(12),
                        ..RetentionPolicy::default()
                    }),
                    tags: Vec::new(),
                },
            )
            .expect("create succeeds");
        let started = schedules.run_now(1, "2", 5).expect("run succeeds");
        let linked = schedules
            .update_notifications(
                1,
                "2",
                5,
                &ScheduleNotifications {
                    on_success: false,
                    on_failure: true,
                    destinations: vec![1, 2],
                },
            )
            .expect("update succeeds");
        (created, started, linked)
    })
    .await;

    assert_eq!(created["id"], 5);
    assert_eq!(started, Payload::Json(json!({"started": true})));
    assert_eq!(linked, Payload::NoContent);
}

#[tokio::test]
async fn notification_destination_is_created_and_tested() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notification-destinations"))
        .and(body_json(json!({
            "name": "Slack Alerts",
            "type": "slack",
            "config": {"webhookUrl": "https://hooks.slack.com/services/T000/B000/XXX"}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 8})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/notification-destinations/8/test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let result = blocking(move || {
        let client = offline(&uri);
        let mut config = serde_json::Map::new();
        config.insert(
            "webhookUrl".to_owned(),
            json!("https://hooks.slack.com/services/T000/B000/XXX"),
        );
        let created = client
            .notifications()
            .create_destination(&CreateDestination {
                name: "Slack Alerts".to_owned(),
                kind: "slack".to_owned(),
                config,
            })
            .expect("create succeeds");
        let id = created["id"].as_u64().expect("numeric id");
        client.notifications().test_destination(id)
    })
    .await
    .expect("test succeeds");
    assert_eq!(result, Payload::Json(json!({"success": true})));
}

#[tokio::test]
async fn volume_actions_keep_empty_null_and_text_bodies_apart() {
    let server = MockServer::start().await;
    let answers = [
        ResponseTemplate::new(204),
        ResponseTemplate::new(200).set_body_json(json!(null)),
        ResponseTemplate::new(200).set_body_json(json!("ok")),
        ResponseTemplate::new(200).set_body_string("ok"),
    ];
    for (volume_id, answer) in (1..).zip(answers) {
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/volumes/{volume_id}/mount")))
            .respond_with(answer)
            .expect(1)
            .mount(&server)
            .await;
    }

    let uri = server.uri();
    let mounted = blocking(move || {
        let client = offline(&uri);
        (1..=4)
            .map(|volume_id| client.volumes().mount(volume_id).expect("mount succeeds"))
            .collect::<Vec<_>>()
    })
    .await;

    assert_eq!(
        mounted,
        vec![
            Payload::NoContent,
            Payload::Json(json!(null)),
            Payload::Json(json!("ok")),
            Payload::Text("ok".to_owned()),
        ]
    );
}

#[tokio::test]
async fn restic_password_download_returns_plain_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/system/download-restic-password"))
        .respond_with(ResponseTemplate::new(200).set_body_string("s3cr3t-restic-pass\n"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let password = blocking(move || offline(&uri).system().download_restic_password())
        .await
        .expect("download succeeds");
    assert_eq!(password, "s3cr3t-restic-pass\n");
}
