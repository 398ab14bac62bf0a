//! FFprobe adapter for media file probing
//!
//! Runs the `ffprobe` executable against the upload and reads duration and
//! dimensions from its JSON output. Only container headers are read, so the
//! file is never decoded in full. In-memory uploads are written to a
//! temporary file that lives exactly as long as the probe call.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    binary: PathBuf,
    timeout: Duration,
    // Where in-memory uploads are spilled; system temp dir when unset
    temp_dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
            temp_dir: None,
        }
    }

    /// Spill in-memory uploads into `dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Parse `ffprobe -of json` output into probe data
    pub fn parse_output(stdout: &[u8]) -> Result<ProbedMedia, DomainError> {
        let output: FfprobeOutput = serde_json::from_slice(stdout)
            .map_err(|e| DomainError::MediaDecode(format!("Unreadable ffprobe output: {}", e)))?;

        let stream = output
            .streams
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::MediaDecode("No video stream found".to_string()))?;

        let duration = output
            .format
            .and_then(|f| f.duration)
            .or(stream.duration)
            .ok_or_else(|| DomainError::MediaDecode("Duration not reported".to_string()))?;
        let duration: f64 = duration
            .trim()
            .parse()
            .map_err(|_| DomainError::MediaDecode(format!("Invalid duration '{}'", duration)))?;

        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(DomainError::MediaDecode("Dimensions not reported".to_string())),
        };

        ProbedMedia::from_raw(duration, width, height)
    }

    /// Write an in-memory upload to a temporary file removed on drop.
    /// The write runs on the blocking pool; if the caller is cancelled the
    /// finished file is dropped (and deleted) with the join result.
    pub async fn spill_to_temp(&self, file: &UploadedFile, data: Arc<Vec<u8>>) -> Result<NamedTempFile, DomainError> {
        let suffix = format!(".{}", file.extension());
        let temp_dir = self.temp_dir.clone();

        tokio::task::spawn_blocking(move || -> Result<NamedTempFile, DomainError> {
            let mut builder = tempfile::Builder::new();
            builder.prefix("clipgate-probe-").suffix(&suffix);
            let mut temp = match &temp_dir {
                Some(dir) => builder.tempfile_in(dir),
                None => builder.tempfile(),
            }
            .map_err(|e| DomainError::FsFail(format!("Failed to create temp file: {}", e)))?;

            temp.write_all(&data)
                .and_then(|_| temp.flush())
                .map_err(|e| DomainError::FsFail(format!("Failed to write temp file: {}", e)))?;
            Ok(temp)
        })
        .await
        .map_err(|e| DomainError::InternalError(format!("Temp file writer panicked: {}", e)))?
    }

    async fn run_ffprobe(&self, path: &Path) -> Result<ProbedMedia, DomainError> {
        debug!("Running {} on {}", self.binary.display(), path.display());

        let child = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "format=duration:stream=width,height,duration",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DomainError::MediaDecode(format!("Failed to start {}: {}", self.binary.display(), e))
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| DomainError::MediaDecode(format!("ffprobe timed out after {:?}", self.timeout)))?
            .map_err(|e| DomainError::MediaDecode(format!("ffprobe failed: {}", e)))?;

        if !output.status.success() {
            return Err(DomainError::MediaDecode(format!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Self::parse_output(&output.stdout)
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe", Duration::from_secs(30))
    }
}

#[async_trait]
impl MediaProbePort for FFprobeAdapter {
    async fn probe(&self, file: &UploadedFile) -> Result<ProbedMedia, DomainError> {
        match &file.source {
            FileSource::Path(path) => self.run_ffprobe(path).await,
            FileSource::Memory(data) => {
                let temp = self.spill_to_temp(file, Arc::clone(data)).await?;
                // `temp` is dropped (and deleted) on every exit from this arm
                self.run_ffprobe(temp.path()).await
            }
        }
    }
}
