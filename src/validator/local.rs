//! Local validation engine

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::DomainError;
use crate::domain::model::{Requirements, UploadedFile, ValidationResult};
use crate::domain::rules::LocalRules;
use crate::ports::MediaProbePort;

/// Checks file size, rounded duration and screen resolution
pub struct LocalValidationEngine {
    requirements: Arc<Requirements>,
    prober: Arc<dyn MediaProbePort>,
}

impl LocalValidationEngine {
    /// Create an engine bound to one ruleset and one prober
    pub fn new(requirements: Arc<Requirements>, prober: Arc<dyn MediaProbePort>) -> Self {
        Self { requirements, prober }
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Probe the file and evaluate it. Any probe failure is reported as
    /// `DomainError::MediaDecode` with no partial result.
    pub async fn validate(&self, file: &UploadedFile) -> Result<ValidationResult, DomainError> {
        debug!("Probing {} ({} bytes)", file.name, file.size);

        let probed = self.prober.probe(file).await.map_err(|e| match e {
            DomainError::MediaDecode(_) => e,
            other => DomainError::MediaDecode(other.to_string()),
        })?;

        let result = LocalRules::evaluate(file, &probed, &self.requirements);

        info!(
            file = %file.name,
            duration = result.duration_seconds,
            width = result.width,
            height = result.height,
            size_ok = result.file_size_valid,
            duration_ok = result.duration_valid,
            resolution_ok = result.resolution_valid,
            "Local validation finished"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ProbedMedia, RequirementsConfig, Screen};
    use async_trait::async_trait;

    struct FixedProber(Result<ProbedMedia, DomainError>);

    #[async_trait]
    impl MediaProbePort for FixedProber {
        async fn probe(&self, _file: &UploadedFile) -> Result<ProbedMedia, DomainError> {
            self.0.clone()
        }
    }

    fn lobby_requirements() -> Arc<Requirements> {
        Arc::new(
            Requirements::from_config(RequirementsConfig {
                container: "mp4".to_string(),
                codec: "h264".to_string(),
                fps: 25.0,
                allowed_durations: vec![15, 30],
                max_size: 50,
                screens: vec![Screen::new("Lobby", 1920, 1080, false)],
            })
            .unwrap(),
        )
    }

    fn ten_megabyte_file(name: &str) -> UploadedFile {
        UploadedFile::new(
            name,
            "video/mp4",
            10 * 1024 * 1024,
            crate::domain::model::FileSource::Memory(Default::default()),
        )
    }

    #[tokio::test]
    async fn test_lobby_scenario_passes() {
        let prober = FixedProber(Ok(ProbedMedia {
            duration_seconds: 15,
            width: 1920,
            height: 1080,
        }));
        let engine = LocalValidationEngine::new(lobby_requirements(), Arc::new(prober));

        let result = engine.validate(&ten_megabyte_file("lobby.mp4")).await.unwrap();
        assert!(result.is_valid);
        assert_eq!(result.matching_screen.unwrap().name, "Lobby");
    }

    #[tokio::test]
    async fn test_wrong_resolution_fails_locally() {
        let prober = FixedProber(Ok(ProbedMedia {
            duration_seconds: 15,
            width: 1280,
            height: 720,
        }));
        let engine = LocalValidationEngine::new(lobby_requirements(), Arc::new(prober));

        let result = engine.validate(&ten_megabyte_file("small.mp4")).await.unwrap();
        assert!(!result.is_valid);
        assert!(!result.resolution_valid);
        assert!(result.matching_screen.is_none());
    }

    #[tokio::test]
    async fn test_probe_failure_is_distinct_error() {
        let prober = FixedProber(Err(DomainError::MediaDecode("corrupt".to_string())));
        let engine = LocalValidationEngine::new(lobby_requirements(), Arc::new(prober));

        let err = engine.validate(&ten_megabyte_file("broken.mp4")).await.unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[tokio::test]
    async fn test_other_probe_errors_become_decode_errors() {
        let prober = FixedProber(Err(DomainError::FsFail("gone".to_string())));
        let engine = LocalValidationEngine::new(lobby_requirements(), Arc::new(prober));

        let err = engine.validate(&ten_megabyte_file("gone.mp4")).await.unwrap_err();
        assert!(matches!(err, DomainError::MediaDecode(msg) if msg.contains("gone")));
    }
}
