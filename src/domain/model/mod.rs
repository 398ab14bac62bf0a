// Domain models - Core types and data structures

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Bytes in one megabyte as used by the requirements file (binary megabytes)
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Where the content of an uploaded file lives
#[derive(Debug, Clone)]
pub enum FileSource {
    /// File already on disk
    Path(PathBuf),
    /// File held in memory (e.g. received from an upload form)
    Memory(Arc<Vec<u8>>),
}

/// A file submitted for validation
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    pub source: FileSource,
}

impl UploadedFile {
    /// Create an uploaded file from explicit parts
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64, source: FileSource) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            source,
        }
    }

    /// Create an in-memory upload; size is the buffer length
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let size = data.len() as u64;
        Self::new(name, mime_type, size, FileSource::Memory(Arc::new(data)))
    }

    /// Create an upload backed by a file on disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Cannot read {}: {}", path.display(), e)))?;

        if !metadata.is_file() {
            return Err(DomainError::BadArgs(format!("Not a file: {}", path.display())));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| DomainError::BadArgs(format!("Invalid file path: {}", path.display())))?;
        let mime_type = guess_mime_type(&name).to_string();

        Ok(Self::new(name, mime_type, metadata.len(), FileSource::Path(path.to_path_buf())))
    }

    /// Lowercased text after the last `.` of the name (the whole name if there is no dot)
    pub fn extension(&self) -> String {
        self.name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase()
    }
}

/// Best-effort MIME type from a file name
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match extension.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "ts" | "m2ts" | "mts" => "video/mp2t",
        _ => "application/octet-stream",
    }
}

/// Named target display profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub night_version: bool,
}

impl Screen {
    pub fn new(name: impl Into<String>, width: u32, height: u32, night_version: bool) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            night_version,
        }
    }

    /// Exact width and height equality
    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}

/// Requirements as written in a configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsConfig {
    pub container: String,
    pub codec: String,
    pub fps: f64,
    #[serde(default)]
    pub allowed_durations: Vec<u32>,
    /// Maximum file size in megabytes
    pub max_size: u64,
    #[serde(default)]
    pub screens: Vec<Screen>,
}

/// Immutable validation ruleset, built once from a [`RequirementsConfig`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    container: String,
    codec: String,
    fps: f64,
    allowed_durations: BTreeSet<u32>,
    max_file_size_bytes: u64,
    screens: Vec<Screen>,
}

impl Requirements {
    /// Validate and normalize a configuration
    pub fn from_config(config: RequirementsConfig) -> Result<Self, DomainError> {
        let container = config.container.trim().trim_start_matches('.').to_lowercase();
        if container.is_empty() {
            return Err(DomainError::InvalidRequirements("container must not be empty".to_string()));
        }

        let codec = config.codec.trim().to_string();
        if codec.is_empty() {
            return Err(DomainError::InvalidRequirements("codec must not be empty".to_string()));
        }

        if !config.fps.is_finite() || config.fps <= 0.0 {
            return Err(DomainError::InvalidRequirements(format!(
                "fps must be positive, got {}",
                config.fps
            )));
        }

        if config.max_size == 0 {
            return Err(DomainError::InvalidRequirements("maxSize must be at least 1 MB".to_string()));
        }
        let max_file_size_bytes = config.max_size.checked_mul(BYTES_PER_MB).ok_or_else(|| {
            DomainError::InvalidRequirements(format!("maxSize {} MB is too large", config.max_size))
        })?;

        if let Some(screen) = config.screens.iter().find(|s| s.width == 0 || s.height == 0) {
            return Err(DomainError::InvalidRequirements(format!(
                "screen '{}' has a zero dimension",
                screen.name
            )));
        }

        if config.allowed_durations.is_empty() {
            tracing::warn!("Requirements allow no durations; every file will fail the duration check");
        }

        Ok(Self {
            container,
            codec,
            fps: config.fps,
            allowed_durations: config.allowed_durations.into_iter().collect(),
            max_file_size_bytes,
            screens: config.screens,
        })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn codec(&self) -> &str {
        &self.codec
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn allowed_durations(&self) -> &BTreeSet<u32> {
        &self.allowed_durations
    }

    /// Inclusive upper bound on file size
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size_bytes / BYTES_PER_MB
    }

    /// Screens in configuration order
    pub fn screens(&self) -> &[Screen] {
        &self.screens
    }
}

/// Metadata extracted by the media prober
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbedMedia {
    pub duration_seconds: u32,
    pub width: u32,
    pub height: u32,
}

impl ProbedMedia {
    /// Build from a raw floating-point duration, rounding to the nearest second
    pub fn from_raw(duration: f64, width: u32, height: u32) -> Result<Self, DomainError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(DomainError::MediaDecode(format!("Invalid duration: {}", duration)));
        }
        if width == 0 || height == 0 {
            return Err(DomainError::MediaDecode(format!(
                "Invalid dimensions: {}x{}",
                width, height
            )));
        }
        let rounded = duration.round();
        if rounded > u32::MAX as f64 {
            return Err(DomainError::MediaDecode(format!("Duration out of range: {}", duration)));
        }

        Ok(Self {
            duration_seconds: rounded as u32,
            width,
            height,
        })
    }
}

/// Outcome of the local validation stage
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Size, duration and resolution together; the container is checked later
    pub is_valid: bool,
    pub file_size: u64,
    pub file_size_valid: bool,
    pub duration_seconds: u32,
    pub duration_valid: bool,
    pub width: u32,
    pub height: u32,
    pub resolution_valid: bool,
    pub matching_screen: Option<Screen>,
    pub file_name: String,
    pub file_type: String,
}

/// Codec and frame rate reported by the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteVideoInfo {
    pub codec: String,
    pub fps: f64,
}

/// Response body of the remote confirmation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteValidation {
    pub is_valid: bool,
    pub video_info: RemoteVideoInfo,
}

/// What happened when remote confirmation was asked for
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum RemoteOutcome {
    /// Feature flag off; nothing was sent
    Disabled,
    /// Service answered with usable data
    Confirmed(RemoteValidation),
    /// Attempted but failed; validation falls back to local checks
    Unavailable { reason: String },
}

impl RemoteOutcome {
    pub fn confirmed(&self) -> Option<&RemoteValidation> {
        match self {
            RemoteOutcome::Confirmed(data) => Some(data),
            _ => None,
        }
    }

    pub fn was_attempted(&self) -> bool {
        !matches!(self, RemoteOutcome::Disabled)
    }
}

/// Per-criterion status tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Error,
}

impl CheckStatus {
    pub fn from_valid(valid: bool) -> Self {
        if valid {
            CheckStatus::Success
        } else {
            CheckStatus::Error
        }
    }

    pub fn is_success(self) -> bool {
        self == CheckStatus::Success
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Success => write!(f, "success"),
            CheckStatus::Error => write!(f, "error"),
        }
    }
}

/// Final structured verdict for one upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoMetadataReport {
    pub file_name: String,
    pub file_type: String,
    pub file_size: u64,
    pub duration: String,
    pub duration_status: CheckStatus,
    pub container: String,
    pub container_status: CheckStatus,
    pub container_valid: bool,
    pub codec: String,
    pub codec_status: CheckStatus,
    pub fps: String,
    pub fps_status: CheckStatus,
    pub resolution: String,
    pub resolution_status: CheckStatus,
    pub file_size_valid: bool,
    pub file_size_status: CheckStatus,
    /// Verdict of the local stage alone (container not included)
    pub local_is_valid: bool,
    pub is_valid: bool,
    pub screen_info: String,
    pub matching_screen: Option<Screen>,
    pub server_validation: bool,
    pub remote: RemoteOutcome,
}

impl VideoMetadataReport {
    /// Names of the criteria that failed, in display order
    pub fn failed_criteria(&self) -> Vec<&'static str> {
        [
            ("duration", self.duration_status),
            ("container", self.container_status),
            ("codec", self.codec_status),
            ("fps", self.fps_status),
            ("resolution", self.resolution_status),
            ("size", self.file_size_status),
        ]
        .into_iter()
        .filter(|(_, status)| !status.is_success())
        .map(|(name, _)| name)
        .collect()
    }
}
