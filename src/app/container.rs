use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapters::{
    DisabledConfirmAdapter, FFprobeAdapter, HttpConfirmAdapter, JsonHistoryAdapter, RemoteEndpoint,
    TomlConfigAdapter,
};
use crate::app::{HistoryInteractor, ValidateInteractor, ValidationPipeline};
use crate::config_initialization::AppSettings;
use crate::domain::model::Requirements;
use crate::error::ClipGateResult;
use crate::ports::{HistoryPort, MediaProbePort, RemoteConfirmPort, RequirementsPort};

pub trait AppContainer: Send + Sync {
    fn validate_interactor(&self) -> Arc<ValidateInteractor>;
    fn history_interactor(&self) -> Arc<HistoryInteractor>;
    fn remote(&self) -> Arc<dyn RemoteConfirmPort>;
    fn requirements(&self) -> Arc<Requirements>;
}

pub struct DefaultAppContainer {
    validate_interactor: Arc<ValidateInteractor>,
    history_interactor: Arc<HistoryInteractor>,
    remote: Arc<dyn RemoteConfirmPort>,
    requirements: Arc<Requirements>,
}

impl DefaultAppContainer {
    pub fn from_settings(settings: &AppSettings) -> ClipGateResult<Self> {
        let requirements_port = match &settings.requirements.path {
            Some(path) => TomlConfigAdapter::from_file(path),
            None => TomlConfigAdapter::embedded(),
        };
        let requirements = Arc::new(requirements_port.load_requirements()?);
        info!(
            screens = requirements.screens().len(),
            source = %requirements_port
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "embedded".to_string()),
            "Requirements loaded"
        );

        let probe_port = Arc::new(FFprobeAdapter::new(
            &settings.probe.ffprobe_path,
            Duration::from_secs(settings.probe.timeout_secs),
        ));

        let remote_port: Arc<dyn RemoteConfirmPort> = if settings.remote.enabled {
            Arc::new(HttpConfirmAdapter::new(RemoteEndpoint {
                base_url: settings.remote.base_url.clone(),
                path: settings.remote.path.clone(),
                field_name: settings.remote.field_name.clone(),
                timeout: Duration::from_secs(settings.remote.timeout_secs),
            })?)
        } else {
            Arc::new(DisabledConfirmAdapter)
        };

        let history_port = Arc::new(JsonHistoryAdapter::new(&settings.history.path));

        let pipeline = Arc::new(ValidationPipeline::new(
            Arc::clone(&requirements),
            Arc::clone(&probe_port) as Arc<dyn MediaProbePort>,
            Arc::clone(&remote_port),
        ));

        let history_interactor = Arc::new(HistoryInteractor::new(
            Arc::clone(&history_port) as Arc<dyn HistoryPort>,
            settings.history.limit,
        ));

        let validate_interactor = Arc::new(ValidateInteractor::new(
            pipeline,
            Arc::clone(&history_interactor),
        ));

        Ok(Self {
            validate_interactor,
            history_interactor,
            remote: remote_port,
            requirements,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn validate_interactor(&self) -> Arc<ValidateInteractor> {
        Arc::clone(&self.validate_interactor)
    }

    fn history_interactor(&self) -> Arc<HistoryInteractor> {
        Arc::clone(&self.history_interactor)
    }

    fn remote(&self) -> Arc<dyn RemoteConfirmPort> {
        Arc::clone(&self.remote)
    }

    fn requirements(&self) -> Arc<Requirements> {
        Arc::clone(&self.requirements)
    }
}
