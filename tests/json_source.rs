use std::fs;

use sysdash::bridge::json_file::read_snapshot;
use sysdash::bridge::{BridgeError, JsonFileBackend, MetricsBackend};
use sysdash::system::snapshot::{ProcessInfo, Snapshot, SnapshotError};
use sysinfo::Signal;
use tempfile::TempDir;

const FULL_DOCUMENT: &str = r#"{
    "cpu": 37.5,
    "mem": 61.0,
    "uptime": "5h 12m",
    "processes": [
        { "pid": 812, "name": "postgres", "cpu": 12.25, "mem": 4.5 },
        { "pid": 1, "name": "init", "cpu": 0.0, "mem": 0.1 }
    ]
}"#;

fn write_source(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("snapshot.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_document_decodes_and_validates() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, FULL_DOCUMENT);

    let reading = read_snapshot(&path).unwrap().validate().unwrap();
    assert_eq!(reading.cpu, 37.5);
    assert_eq!(reading.mem, 61.0);
    assert_eq!(reading.uptime.as_deref(), Some("5h 12m"));
    assert_eq!(
        reading.processes[0],
        ProcessInfo {
            pid: 812,
            name: "postgres".to_string(),
            cpu: 12.25,
            mem: 4.5,
        }
    );
    assert_eq!(reading.processes.len(), 2);
}

#[test]
fn missing_cpu_is_rejected_by_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, r#"{ "mem": 10.0, "processes": [] }"#);

    let snapshot = read_snapshot(&path).unwrap();
    assert_eq!(snapshot.validate(), Err(SnapshotError::MissingField("cpu")));
}

#[test]
fn missing_process_list_means_empty_table() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, r#"{ "cpu": 1.0, "mem": 2.0 }"#);

    let reading = read_snapshot(&path).unwrap().validate().unwrap();
    assert!(reading.processes.is_empty());
    assert!(reading.uptime.is_none());
}

#[test]
fn unreadable_and_malformed_sources_report_their_path() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("absent.json");
    let err = read_snapshot(&missing).unwrap_err();
    assert!(matches!(err, BridgeError::Read { .. }));
    assert!(err.to_string().contains("absent.json"));

    let garbage = write_source(&dir, "{ not json");
    let err = read_snapshot(&garbage).unwrap_err();
    assert!(matches!(err, BridgeError::Decode { .. }));
    assert!(err.to_string().contains("snapshot.json"));
}

#[tokio::test]
async fn backend_yields_none_when_source_is_unusable() {
    let dir = TempDir::new().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("absent.json"), Signal::Kill);
    assert!(backend.fetch_snapshot().await.is_none());
}

#[tokio::test]
async fn backend_rereads_the_file_on_every_fetch() {
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, r#"{ "cpu": 10.0, "mem": 20.0 }"#);
    let backend = JsonFileBackend::new(&path, Signal::Kill);

    let first = backend.fetch_snapshot().await.unwrap();
    assert_eq!(first.cpu, Some(10.0));

    fs::write(&path, r#"{ "cpu": 90.0, "mem": 20.0 }"#).unwrap();
    let second = backend.fetch_snapshot().await.unwrap();
    assert_eq!(second.cpu, Some(90.0));
}

#[tokio::test]
async fn published_snapshot_reads_back_unchanged() {
    let published = Snapshot {
        cpu: Some(12.5),
        mem: Some(48.25),
        uptime: Some("1h 2m".to_string()),
        processes: vec![ProcessInfo {
            pid: 4321,
            name: "nginx: worker".to_string(),
            cpu: 3.75,
            mem: 0.5,
        }],
    };
    let dir = TempDir::new().unwrap();
    let path = write_source(&dir, &serde_json::to_string_pretty(&published).unwrap());

    let backend = JsonFileBackend::new(&path, Signal::Kill);
    assert_eq!(backend.fetch_snapshot().await, Some(published));
}
