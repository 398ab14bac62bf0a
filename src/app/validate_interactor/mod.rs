// Validate interactor - Orchestrates probe, remote confirmation and report assembly

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::app::history_interactor::HistoryInteractor;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::validator::{LocalValidationEngine, MetadataAssembler};

/// Probe -> remote confirmation -> assembly, one independent run per file.
///
/// Every run takes a fresh token. Starting a newer run (or calling
/// [`supersede`](Self::supersede)) makes older runs stop at their next
/// suspension point with `DomainError::Superseded`; their in-flight probe and
/// network futures are dropped, which releases any temporary files.
pub struct ValidationPipeline {
    engine: LocalValidationEngine,
    remote: Arc<dyn RemoteConfirmPort>,
    generation: watch::Sender<u64>,
}

impl ValidationPipeline {
    pub fn new(
        requirements: Arc<Requirements>,
        prober: Arc<dyn MediaProbePort>,
        remote: Arc<dyn RemoteConfirmPort>,
    ) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            engine: LocalValidationEngine::new(requirements, prober),
            remote,
            generation,
        }
    }

    pub fn requirements(&self) -> &Requirements {
        self.engine.requirements()
    }

    /// Invalidate every run currently in flight
    pub fn supersede(&self) {
        self.generation.send_modify(|g| *g += 1);
    }

    /// Validate one file and build its report
    pub async fn run(&self, file: &UploadedFile) -> Result<VideoMetadataReport, DomainError> {
        let mut watcher = self.generation.subscribe();
        let mut token = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            token = *g;
        });
        debug!(token, file = %file.name, "Validation run started");

        let local = tokio::select! {
            result = self.engine.validate(file) => result?,
            _ = wait_superseded(&mut watcher, token) => return Err(DomainError::Superseded),
        };

        let remote = tokio::select! {
            outcome = self.remote.confirm(file) => outcome,
            _ = wait_superseded(&mut watcher, token) => return Err(DomainError::Superseded),
        };

        if *watcher.borrow() != token {
            return Err(DomainError::Superseded);
        }

        Ok(MetadataAssembler::assemble(file, &local, remote, self.requirements()))
    }
}

/// Resolves once the generation moves past `token`, including a move that
/// was already marked seen before this call
async fn wait_superseded(watcher: &mut watch::Receiver<u64>, token: u64) {
    loop {
        if *watcher.borrow_and_update() != token {
            return;
        }
        if watcher.changed().await.is_err() {
            // Sender gone: nothing can supersede this run any more
            std::future::pending::<()>().await;
        }
    }
}

/// Request for validating one upload
#[derive(Debug, Clone)]
pub struct ValidateRequest {
    pub file: UploadedFile,
    pub record_history: bool,
}

impl ValidateRequest {
    pub fn new(file: UploadedFile) -> Self {
        Self {
            file,
            record_history: true,
        }
    }

    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }
}

/// Interactor for the validate use case
pub struct ValidateInteractor {
    pipeline: Arc<ValidationPipeline>,
    history: Arc<HistoryInteractor>,
}

impl ValidateInteractor {
    pub fn new(pipeline: Arc<ValidationPipeline>, history: Arc<HistoryInteractor>) -> Self {
        Self { pipeline, history }
    }

    /// Validate and, on success, record a history summary.
    /// Decode failures produce no report and no history entry.
    pub async fn execute(&self, request: ValidateRequest) -> Result<VideoMetadataReport, DomainError> {
        info!("Starting validation for: {}", request.file.name);

        let report = self.pipeline.run(&request.file).await?;

        if request.record_history {
            if let Err(e) = self.history.record(&report).await {
                error!("Failed to save history entry: {}", e);
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::DisabledConfirmAdapter;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    struct SlowProber {
        delay: Duration,
        probed: ProbedMedia,
    }

    #[async_trait]
    impl MediaProbePort for SlowProber {
        async fn probe(&self, file: &UploadedFile) -> Result<ProbedMedia, DomainError> {
            if file.name.starts_with("slow") {
                tokio::time::sleep(self.delay).await;
            }
            if file.name.starts_with("broken") {
                return Err(DomainError::MediaDecode("corrupt".to_string()));
            }
            Ok(self.probed)
        }
    }

    struct CountingRemote {
        calls: AtomicUsize,
        outcome: RemoteOutcome,
    }

    #[async_trait]
    impl RemoteConfirmPort for CountingRemote {
        async fn confirm(&self, _file: &UploadedFile) -> RemoteOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn health(&self) -> Result<bool, DomainError> {
            Ok(true)
        }
    }

    #[derive(Default)]
    struct MemoryHistory(Mutex<Vec<HistoryEntry>>);

    #[async_trait]
    impl HistoryPort for MemoryHistory {
        async fn load(&self) -> Result<Vec<HistoryEntry>, DomainError> {
            Ok(self.0.lock().unwrap().clone())
        }

        async fn store(&self, entries: &[HistoryEntry]) -> Result<(), DomainError> {
            *self.0.lock().unwrap() = entries.to_vec();
            Ok(())
        }
    }

    fn requirements() -> Arc<Requirements> {
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

    fn lobby_prober() -> Arc<SlowProber> {
        Arc::new(SlowProber {
            delay: Duration::from_millis(200),
            probed: ProbedMedia {
                duration_seconds: 15,
                width: 1920,
                height: 1080,
            },
        })
    }

    fn upload(name: &str) -> UploadedFile {
        UploadedFile::from_bytes(name, "video/mp4", vec![0; 64])
    }

    #[tokio::test]
    async fn test_run_disabled_remote() {
        let pipeline = ValidationPipeline::new(requirements(), lobby_prober(), Arc::new(DisabledConfirmAdapter));
        let report = pipeline.run(&upload("lobby.mp4")).await.unwrap();

        assert!(report.is_valid);
        assert_eq!(report.remote, RemoteOutcome::Disabled);
    }

    #[tokio::test]
    async fn test_remote_codec_mismatch_rejects() {
        let remote = Arc::new(CountingRemote {
            calls: AtomicUsize::new(0),
            outcome: RemoteOutcome::Confirmed(RemoteValidation {
                is_valid: false,
                video_info: RemoteVideoInfo {
                    codec: "vp9".to_string(),
                    fps: 25.0,
                },
            }),
        });
        let pipeline = ValidationPipeline::new(requirements(), lobby_prober(), remote.clone());

        let report = pipeline.run(&upload("lobby.mp4")).await.unwrap();
        assert!(report.local_is_valid);
        assert!(!report.is_valid);
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_decode_failure_skips_remote() {
        let remote = Arc::new(CountingRemote {
            calls: AtomicUsize::new(0),
            outcome: RemoteOutcome::Disabled,
        });
        let pipeline = ValidationPipeline::new(requirements(), lobby_prober(), remote.clone());

        let err = pipeline.run(&upload("broken.mp4")).await.unwrap_err();
        assert!(err.is_decode_failure());
        assert_eq!(remote.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_newer_run_supersedes_older() {
        let pipeline = Arc::new(ValidationPipeline::new(
            requirements(),
            lobby_prober(),
            Arc::new(DisabledConfirmAdapter),
        ));

        let stale = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.run(&upload("slow.mp4")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fresh = pipeline.run(&upload("lobby.mp4")).await;
        assert!(fresh.unwrap().is_valid);
        assert_eq!(stale.await.unwrap().unwrap_err(), DomainError::Superseded);
    }

    #[tokio::test]
    async fn test_explicit_supersede() {
        let pipeline = Arc::new(ValidationPipeline::new(
            requirements(),
            lobby_prober(),
            Arc::new(DisabledConfirmAdapter),
        ));

        let pending = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.run(&upload("slow.mp4")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        pipeline.supersede();

        assert_eq!(pending.await.unwrap().unwrap_err(), DomainError::Superseded);
    }

    #[tokio::test]
    async fn test_wait_superseded_sees_already_observed_generation() {
        let (sender, mut watcher) = watch::channel(0u64);
        sender.send_modify(|g| *g = 1);
        sender.send_modify(|g| *g = 2);
        // A newer run bumped the counter and this receiver already saw it
        watcher.borrow_and_update();

        let resolved = tokio::time::timeout(Duration::from_millis(200), wait_superseded(&mut watcher, 1)).await;
        assert!(resolved.is_ok());
    }

    #[tokio::test]
    async fn test_wait_superseded_pends_for_current_token() {
        let (_sender, mut watcher) = watch::channel(1u64);

        let resolved = tokio::time::timeout(Duration::from_millis(50), wait_superseded(&mut watcher, 1)).await;
        assert!(resolved.is_err());
    }

    #[tokio::test]
    async fn test_interactor_records_history_only_on_success() {
        let pipeline = Arc::new(ValidationPipeline::new(
            requirements(),
            lobby_prober(),
            Arc::new(DisabledConfirmAdapter),
        ));
        let store = Arc::new(MemoryHistory::default());
        let history = Arc::new(HistoryInteractor::new(store.clone(), 50));
        let interactor = ValidateInteractor::new(pipeline, history);

        interactor.execute(ValidateRequest::new(upload("lobby.mp4"))).await.unwrap();
        assert!(interactor.execute(ValidateRequest::new(upload("broken.mp4"))).await.is_err());
        interactor
            .execute(ValidateRequest::new(upload("skip.mp4")).without_history())
            .await
            .unwrap();

        let entries = store.load().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name, "lobby.mp4");
        assert!(entries[0].passed);
    }
}
