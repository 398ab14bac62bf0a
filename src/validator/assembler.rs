//! Metadata assembler - merges local and remote results into the final report

use tracing::{info, warn};

use crate::domain::model::*;
use crate::domain::rules::ReportRules;

/// Builds a [`VideoMetadataReport`] from the stage outputs
pub struct MetadataAssembler;

impl MetadataAssembler {
    /// Assemble the report. Remote confirmation can only make the verdict stricter.
    pub fn assemble(
        file: &UploadedFile,
        local: &ValidationResult,
        remote: RemoteOutcome,
        requirements: &Requirements,
    ) -> VideoMetadataReport {
        let extension = file.extension();
        let container_valid = ReportRules::container_valid(&extension, requirements);

        let (codec, codec_valid, fps, fps_valid) = match remote.confirmed() {
            Some(confirmed) => {
                let info = &confirmed.video_info;
                (
                    info.codec.clone(),
                    ReportRules::codec_matches(&info.codec, requirements),
                    format_fps(info.fps),
                    ReportRules::fps_matches(info.fps, requirements),
                )
            }
            None => (
                requirements.codec().to_string(),
                true,
                format_fps(requirements.fps()),
                true,
            ),
        };

        if let Some(confirmed) = remote.confirmed() {
            if confirmed.is_valid != (codec_valid && fps_valid) {
                warn!(
                    remote_is_valid = confirmed.is_valid,
                    codec_ok = codec_valid,
                    fps_ok = fps_valid,
                    "Remote verdict disagrees with codec/fps comparison"
                );
            }
        }

        let is_valid = local.is_valid && container_valid && codec_valid && fps_valid;

        let report = VideoMetadataReport {
            file_name: local.file_name.clone(),
            file_type: local.file_type.clone(),
            file_size: local.file_size,
            duration: format!("{} секунд", local.duration_seconds),
            duration_status: CheckStatus::from_valid(local.duration_valid),
            container: format!(".{}", extension),
            container_status: CheckStatus::from_valid(container_valid),
            container_valid,
            codec,
            codec_status: CheckStatus::from_valid(codec_valid),
            fps,
            fps_status: CheckStatus::from_valid(fps_valid),
            resolution: format!("{}x{} px", local.width, local.height),
            resolution_status: CheckStatus::from_valid(local.resolution_valid),
            file_size_valid: local.file_size_valid,
            file_size_status: CheckStatus::from_valid(local.file_size_valid),
            local_is_valid: local.is_valid,
            is_valid,
            screen_info: ReportRules::screen_info(local.matching_screen.as_ref()),
            matching_screen: local.matching_screen.clone(),
            server_validation: remote.confirmed().is_some(),
            remote,
        };

        if report.is_valid {
            info!(file = %report.file_name, "Video meets all requirements");
        } else {
            warn!(file = %report.file_name, failed = ?report.failed_criteria(), "Video rejected");
        }

        report
    }
}

fn format_fps(fps: f64) -> String {
    format!("{}", fps)
}
