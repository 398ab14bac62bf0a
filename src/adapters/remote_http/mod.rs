//! Remote confirmation over HTTP
//!
//! Posts the raw file as multipart form data and reads back the codec and
//! frame rate detected by the server. Every failure is swallowed into
//! [`RemoteOutcome::Unavailable`] so validation keeps working offline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Settings for the HTTP confirmation client
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    pub base_url: String,
    pub path: String,
    pub field_name: String,
    pub timeout: Duration,
}

impl RemoteEndpoint {
    pub fn validate_url(&self) -> String {
        join_url(&self.base_url, &self.path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, "/health")
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// HTTP confirmation adapter
pub struct HttpConfirmAdapter {
    client: reqwest::Client,
    endpoint: RemoteEndpoint,
}

impl HttpConfirmAdapter {
    pub fn new(endpoint: RemoteEndpoint) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .map_err(|e| DomainError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    /// Files on disk are streamed; in-memory uploads are sent from their buffer
    async fn file_part(file: &UploadedFile) -> Result<Part, DomainError> {
        match &file.source {
            FileSource::Path(path) => {
                let handle = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| DomainError::FsFail(format!("Cannot open {}: {}", path.display(), e)))?;
                Ok(Part::stream_with_length(handle, file.size))
            }
            FileSource::Memory(data) => Ok(Part::bytes(data.as_ref().clone())),
        }
    }

    async fn try_confirm(&self, file: &UploadedFile) -> Result<RemoteValidation, DomainError> {
        let part = Self::file_part(file)
            .await?
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| DomainError::BadArgs(format!("Invalid MIME type '{}': {}", file.mime_type, e)))?;
        let form = Form::new().part(self.endpoint.field_name.clone(), part);

        let url = self.endpoint.validate_url();
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DomainError::RemoteUnavailable(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::RemoteUnavailable(format!("Server answered {}", status)));
        }

        response
            .json::<RemoteValidation>()
            .await
            .map_err(|e| DomainError::RemoteUnavailable(format!("Malformed response: {}", e)))
    }
}

#[async_trait]
impl RemoteConfirmPort for HttpConfirmAdapter {
    async fn confirm(&self, file: &UploadedFile) -> RemoteOutcome {
        match self.try_confirm(file).await {
            Ok(validation) => {
                info!(
                    codec = %validation.video_info.codec,
                    fps = validation.video_info.fps,
                    is_valid = validation.is_valid,
                    "Remote confirmation received"
                );
                RemoteOutcome::Confirmed(validation)
            }
            Err(e) => {
                warn!("Remote confirmation unavailable, using local checks only: {}", e);
                RemoteOutcome::Unavailable { reason: e.to_string() }
            }
        }
    }

    async fn health(&self) -> Result<bool, DomainError> {
        let url = self.endpoint.health_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::RemoteUnavailable(format!("Request to {} failed: {}", url, e)))?;
        Ok(response.status().is_success())
    }
}

/// Confirmation port used when the feature flag is off; never touches the network
pub struct DisabledConfirmAdapter;

#[async_trait]
impl RemoteConfirmPort for DisabledConfirmAdapter {
    async fn confirm(&self, _file: &UploadedFile) -> RemoteOutcome {
        RemoteOutcome::Disabled
    }

    async fn health(&self) -> Result<bool, DomainError> {
        Err(DomainError::RemoteUnavailable("remote confirmation is disabled".to_string()))
    }
}
