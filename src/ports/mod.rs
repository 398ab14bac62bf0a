// Ports - Interface definitions (contracts)

use crate::domain::errors::*;
use crate::domain::model::*;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Port for extracting duration and dimensions from a media file
#[async_trait]
pub trait MediaProbePort: Send + Sync {
    /// Probe the file; fails with `DomainError::MediaDecode` and never returns partial data
    async fn probe(&self, file: &UploadedFile) -> Result<ProbedMedia, DomainError>;
}

/// Port for authoritative codec/FPS confirmation
#[async_trait]
pub trait RemoteConfirmPort: Send + Sync {
    /// Never fails: errors degrade to `RemoteOutcome::Unavailable`
    async fn confirm(&self, file: &UploadedFile) -> RemoteOutcome;

    /// Whether the remote service answers its health check
    async fn health(&self) -> Result<bool, DomainError>;
}

/// Port for loading the requirements ruleset
pub trait RequirementsPort: Send + Sync {
    fn load_requirements(&self) -> Result<Requirements, DomainError>;
}

/// Trimmed report summary kept in the history list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub file_name: String,
    pub timestamp: DateTime<Utc>,
    pub passed: bool,
    pub duration: String,
    pub container: String,
    pub resolution: String,
    pub file_size: String,
}

impl HistoryEntry {
    /// Summarize a report at the given moment
    pub fn from_report(report: &VideoMetadataReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            file_name: report.file_name.clone(),
            timestamp,
            passed: report.is_valid,
            duration: report.duration.clone(),
            container: report.container.clone(),
            resolution: report.resolution.clone(),
            file_size: format!("{} МБ", (report.file_size as f64 / BYTES_PER_MB as f64).round() as u64),
        }
    }
}

/// Port for the bounded history list
#[async_trait]
pub trait HistoryPort: Send + Sync {
    /// Entries, newest first
    async fn load(&self) -> Result<Vec<HistoryEntry>, DomainError>;

    /// Replace the stored list
    async fn store(&self, entries: &[HistoryEntry]) -> Result<(), DomainError>;
}
