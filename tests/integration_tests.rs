use std::sync::Arc;

use assert_cmd::Command;
use async_trait::async_trait;
use axum::routing::post;
use axum::{Json, Router};
use predicates::prelude::*;
use tempfile::TempDir;

use clipgate::adapters::{DisabledConfirmAdapter, FFprobeAdapter, HttpConfirmAdapter, RemoteEndpoint, TomlConfigAdapter};
use clipgate::app::ValidationPipeline;
use clipgate::domain::model::{CheckStatus, ProbedMedia, RemoteOutcome, UploadedFile};
use clipgate::ports::{MediaProbePort, RemoteConfirmPort, RequirementsPort};
use clipgate::{DomainError, Requirements};

/// Test utilities for pipeline runs without ffprobe
mod test_utils {
    use super::*;

    /// Prober returning fixed dimensions and duration
    pub struct FixedProber(pub ProbedMedia);

    #[async_trait]
    impl MediaProbePort for FixedProber {
        async fn probe(&self, _file: &UploadedFile) -> Result<ProbedMedia, DomainError> {
            Ok(self.0)
        }
    }

    pub fn probed(duration_seconds: u32, width: u32, height: u32) -> Arc<FixedProber> {
        Arc::new(FixedProber(ProbedMedia {
            duration_seconds,
            width,
            height,
        }))
    }

    pub fn embedded_requirements() -> Arc<Requirements> {
        Arc::new(TomlConfigAdapter::embedded().load_requirements().unwrap())
    }

    pub fn upload(name: &str, size: usize) -> UploadedFile {
        UploadedFile::from_bytes(name, "video/mp4", vec![0u8; size])
    }

    pub fn endpoint(base_url: String) -> RemoteEndpoint {
        RemoteEndpoint {
            base_url,
            path: "/api/validate-video".to_string(),
            field_name: "file".to_string(),
            timeout: std::time::Duration::from_secs(5),
        }
    }

    /// Executable standing in for an ffprobe that never answers
    #[cfg(unix)]
    pub fn hanging_ffprobe(dir: &TempDir) -> std::path::PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.path().join("ffprobe");
        std::fs::write(&path, "#!/bin/sh\nsleep 10\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Serve `router` on an ephemeral local port
    pub async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

use test_utils::*;

#[tokio::test]
async fn test_lobby_clip_passes_locally() {
    let pipeline = ValidationPipeline::new(embedded_requirements(), probed(15, 1920, 1080), Arc::new(DisabledConfirmAdapter));

    let report = pipeline.run(&upload("promo.mp4", 10 * 1024 * 1024)).await.unwrap();

    assert!(report.is_valid);
    assert_eq!(report.duration, "15 секунд");
    assert_eq!(report.container, ".mp4");
    assert_eq!(report.resolution, "1920x1080 px");
    assert_eq!(report.screen_info, "Lobby LED wall");
    assert!(!report.server_validation);
    assert_eq!(report.remote, RemoteOutcome::Disabled);
}

#[tokio::test]
async fn test_unmatched_resolution_fails() {
    let pipeline = ValidationPipeline::new(embedded_requirements(), probed(15, 1366, 768), Arc::new(DisabledConfirmAdapter));

    let report = pipeline.run(&upload("promo.mp4", 1024)).await.unwrap();

    assert!(!report.is_valid);
    assert_eq!(report.resolution_status, CheckStatus::Error);
    assert_eq!(report.screen_info, "Подходящий экран не найден");
    assert_eq!(report.failed_criteria(), vec!["resolution"]);
}

#[tokio::test]
async fn test_night_screen_and_wrong_container() {
    let pipeline = ValidationPipeline::new(embedded_requirements(), probed(30, 1080, 1920), Arc::new(DisabledConfirmAdapter));

    let report = pipeline.run(&upload("pylon.MOV", 1024)).await.unwrap();

    assert!(report.local_is_valid);
    assert!(!report.is_valid);
    assert_eq!(report.container, ".mov");
    assert_eq!(report.container_status, CheckStatus::Error);
    assert_eq!(report.screen_info, "Entrance pylon (требуется ночная версия)");
}

#[tokio::test]
async fn test_remote_confirmation_roundtrip() {
    let router = Router::new().route(
        "/api/validate-video",
        post(|| async {
            Json(serde_json::json!({
                "is_valid": true,
                "video_info": {"codec": "H264", "fps": 25.04}
            }))
        }),
    );
    let base_url = serve(router).await;
    let remote = Arc::new(HttpConfirmAdapter::new(endpoint(base_url)).unwrap());
    let pipeline = ValidationPipeline::new(embedded_requirements(), probed(15, 1920, 1080), remote);

    let report = pipeline.run(&upload("promo.mp4", 2048)).await.unwrap();

    assert!(report.server_validation);
    assert_eq!(report.codec, "H264");
    assert_eq!(report.codec_status, CheckStatus::Success);
    assert_eq!(report.fps_status, CheckStatus::Success);
    assert!(report.is_valid);
}

#[tokio::test]
async fn test_unreachable_remote_still_reports() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let remote = Arc::new(HttpConfirmAdapter::new(endpoint(base_url)).unwrap());
    assert!(remote.health().await.is_err());

    let pipeline = ValidationPipeline::new(embedded_requirements(), probed(15, 1920, 1080), remote);
    let report = pipeline.run(&upload("promo.mp4", 2048)).await.unwrap();

    assert!(!report.server_validation);
    assert!(matches!(report.remote, RemoteOutcome::Unavailable { .. }));
    assert!(report.is_valid);
}

#[cfg(unix)]
#[tokio::test]
async fn test_superseded_run_releases_spilled_upload() {
    use std::time::Duration;

    let bin = TempDir::new().unwrap();
    let spill = TempDir::new().unwrap();
    let prober = Arc::new(FFprobeAdapter::new(hanging_ffprobe(&bin), Duration::from_secs(30)).with_temp_dir(spill.path()));
    let pipeline = Arc::new(ValidationPipeline::new(embedded_requirements(), prober, Arc::new(DisabledConfirmAdapter)));

    let pending = {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move { pipeline.run(&upload("promo.mp4", 4096)).await })
    };

    // Wait until the upload has been spilled and ffprobe is running
    let mut spilled = false;
    for _ in 0..100 {
        let written = std::fs::read_dir(spill.path())
            .unwrap()
            .filter_map(|entry| entry.ok()?.metadata().ok())
            .any(|meta| meta.len() == 4096);
        if written {
            spilled = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(spilled);
    tokio::time::sleep(Duration::from_millis(50)).await;

    pipeline.supersede();

    assert_eq!(pending.await.unwrap().unwrap_err(), DomainError::Superseded);
    assert!(std::fs::read_dir(spill.path()).unwrap().next().is_none());
}

fn clipgate(workdir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clipgate").unwrap();
    cmd.current_dir(workdir.path());
    for key in [
        "CLIPGATE_REQUIREMENTS",
        "CLIPGATE_REMOTE_ENABLED",
        "CLIPGATE_REMOTE_URL",
        "CLIPGATE_FFPROBE",
        "CLIPGATE_HISTORY_PATH",
        "CLIPGATE_LOG_LEVEL",
        "CLIPGATE_LOG_FORMAT",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_cli_requirements_json() {
    let workdir = TempDir::new().unwrap();

    clipgate(&workdir)
        .args(["requirements", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"allowedDurations\""))
        .stdout(predicate::str::contains("Lobby LED wall"));
}

#[test]
fn test_cli_validate_missing_file() {
    let workdir = TempDir::new().unwrap();

    clipgate(&workdir)
        .args(["validate", "--input", "does-not-exist.mp4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_cli_validate_undecodable_file() {
    let workdir = TempDir::new().unwrap();
    let input = workdir.path().join("garbage.mp4");
    std::fs::write(&input, b"definitely not a video").unwrap();

    clipgate(&workdir)
        .args(["validate", "--input"])
        .arg(&input)
        .args(["--ffprobe", "/nonexistent/ffprobe"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not process this video"));

    // Decode failures never reach history
    assert!(!workdir.path().join("clipgate-history.json").exists());
}

#[test]
fn test_cli_history_empty() {
    let workdir = TempDir::new().unwrap();

    clipgate(&workdir)
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History is empty"));
}
