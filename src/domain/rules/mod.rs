// Domain rules - Per-criterion checks against the requirements

use crate::domain::model::*;

/// Maximum difference between reported and expected frame rate (exclusive)
pub const FPS_TOLERANCE: f64 = 0.1;

/// Text shown when no screen in the catalog matches the resolution
pub const NO_MATCHING_SCREEN: &str = "Подходящий экран не найден";

/// Suffix appended to the screen name when a night version is required
pub const NIGHT_VERSION_SUFFIX: &str = " (требуется ночная версия)";

/// Checks used by the local validation stage
pub struct LocalRules;

impl LocalRules {
    /// Inclusive upper bound: a file exactly at the limit passes
    pub fn file_size_valid(size: u64, requirements: &Requirements) -> bool {
        size <= requirements.max_file_size_bytes()
    }

    /// Set membership on the rounded duration, not a range
    pub fn duration_valid(duration_seconds: u32, requirements: &Requirements) -> bool {
        requirements.allowed_durations().contains(&duration_seconds)
    }

    /// First screen in catalog order with exactly this width and height
    pub fn matching_screen(width: u32, height: u32, requirements: &Requirements) -> Option<&Screen> {
        requirements.screens().iter().find(|screen| screen.matches(width, height))
    }

    /// Combine file metadata and probe output into a local verdict
    pub fn evaluate(file: &UploadedFile, probed: &ProbedMedia, requirements: &Requirements) -> ValidationResult {
        let file_size_valid = Self::file_size_valid(file.size, requirements);
        let duration_valid = Self::duration_valid(probed.duration_seconds, requirements);
        let matching_screen = Self::matching_screen(probed.width, probed.height, requirements).cloned();
        let resolution_valid = matching_screen.is_some();

        ValidationResult {
            is_valid: file_size_valid && duration_valid && resolution_valid,
            file_size: file.size,
            file_size_valid,
            duration_seconds: probed.duration_seconds,
            duration_valid,
            width: probed.width,
            height: probed.height,
            resolution_valid,
            matching_screen,
            file_name: file.name.clone(),
            file_type: file.mime_type.clone(),
        }
    }
}

/// Checks applied when assembling the final report
pub struct ReportRules;

impl ReportRules {
    /// Extension must equal the configured container exactly (extension is lowercased first)
    pub fn container_valid(extension: &str, requirements: &Requirements) -> bool {
        extension.to_lowercase() == requirements.container()
    }

    pub fn codec_matches(reported: &str, requirements: &Requirements) -> bool {
        reported.trim().eq_ignore_ascii_case(requirements.codec())
    }

    pub fn fps_matches(reported: f64, requirements: &Requirements) -> bool {
        reported.is_finite() && (reported - requirements.fps()).abs() < FPS_TOLERANCE
    }

    /// Screen name with night flag, or the fixed no-match text
    pub fn screen_info(screen: Option<&Screen>) -> String {
        match screen {
            Some(screen) if screen.night_version => format!("{}{}", screen.name, NIGHT_VERSION_SUFFIX),
            Some(screen) => screen.name.clone(),
            None => NO_MATCHING_SCREEN.to_string(),
        }
    }
}
