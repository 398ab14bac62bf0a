//! Text, JSON and YAML rendering of reports, requirements and history

use std::fmt::Write;

use serde::Serialize;

use crate::domain::model::{CheckStatus, Requirements, VideoMetadataReport};
use crate::error::{ClipGateError, ClipGateResult};
use crate::output::ReportFormat;
use crate::ports::HistoryEntry;
use crate::utils::Utils;

/// Renders domain values into the selected output format
pub struct ReportWriter {
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Render a validation report
    pub fn render_report(&self, report: &VideoMetadataReport) -> ClipGateResult<String> {
        match self.format {
            ReportFormat::Text => text_report(report),
            _ => self.serialize(report),
        }
    }

    /// Render the active requirements
    pub fn render_requirements(&self, requirements: &Requirements) -> ClipGateResult<String> {
        match self.format {
            ReportFormat::Text => text_requirements(requirements),
            _ => self.serialize(&RequirementsView::from(requirements)),
        }
    }

    /// Render history entries, newest first
    pub fn render_history(&self, entries: &[HistoryEntry]) -> ClipGateResult<String> {
        match self.format {
            ReportFormat::Text => text_history(entries),
            _ => self.serialize(&entries),
        }
    }

    fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> ClipGateResult<String> {
        match self.format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            ReportFormat::Text => Err(ClipGateError::OutputError {
                message: "text output is not a serialization format".to_string(),
            }),
        }
    }
}

/// Serializable view of requirements, same shape as the requirements file
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequirementsView<'a> {
    container: &'a str,
    codec: &'a str,
    fps: f64,
    allowed_durations: Vec<u32>,
    max_size: u64,
    screens: &'a [crate::domain::model::Screen],
}

impl<'a> From<&'a Requirements> for RequirementsView<'a> {
    fn from(requirements: &'a Requirements) -> Self {
        Self {
            container: requirements.container(),
            codec: requirements.codec(),
            fps: requirements.fps(),
            allowed_durations: requirements.allowed_durations().iter().copied().collect(),
            max_size: requirements.max_file_size_mb(),
            screens: requirements.screens(),
        }
    }
}

fn mark(status: CheckStatus) -> &'static str {
    if status.is_success() {
        "✓"
    } else {
        "✗"
    }
}

fn text_report(report: &VideoMetadataReport) -> ClipGateResult<String> {
    let mut out = String::new();
    write_text_report(&mut out, report).map_err(|e| ClipGateError::OutputError {
        message: e.to_string(),
    })?;
    Ok(out)
}

fn write_text_report(out: &mut String, report: &VideoMetadataReport) -> std::fmt::Result {
    writeln!(out, "Validation Report")?;
    writeln!(out, "=================")?;
    writeln!(out, "File: {}", report.file_name)?;
    writeln!(out, "Type: {}", report.file_type)?;
    writeln!(out)?;

    writeln!(out, "Checks:")?;
    writeln!(out, "  {} Duration:   {}", mark(report.duration_status), report.duration)?;
    writeln!(out, "  {} Container:  {}", mark(report.container_status), report.container)?;
    writeln!(out, "  {} Codec:      {}", mark(report.codec_status), report.codec)?;
    writeln!(out, "  {} FPS:        {}", mark(report.fps_status), report.fps)?;
    writeln!(out, "  {} Resolution: {}", mark(report.resolution_status), report.resolution)?;
    writeln!(
        out,
        "  {} Size:       {}",
        mark(report.file_size_status),
        Utils::format_file_size(report.file_size)
    )?;
    writeln!(out)?;

    writeln!(out, "Screen: {}", report.screen_info)?;
    if report.server_validation {
        writeln!(out, "Server validation: ✓ confirmed")?;
    } else if report.remote.was_attempted() {
        writeln!(out, "Server validation: ⚠ unavailable, local checks only")?;
    } else {
        writeln!(out, "Server validation: disabled")?;
    }
    writeln!(out)?;

    if report.is_valid {
        writeln!(out, "Result: ✓ PASSED")?;
    } else {
        writeln!(out, "Result: ✗ FAILED ({})", report.failed_criteria().join(", "))?;
    }
    Ok(())
}

fn text_requirements(requirements: &Requirements) -> ClipGateResult<String> {
    let mut out = String::new();
    write_text_requirements(&mut out, requirements).map_err(|e| ClipGateError::OutputError {
        message: e.to_string(),
    })?;
    Ok(out)
}

fn write_text_requirements(out: &mut String, requirements: &Requirements) -> std::fmt::Result {
    let durations: Vec<String> = requirements
        .allowed_durations()
        .iter()
        .map(|d| d.to_string())
        .collect();

    writeln!(out, "Requirements")?;
    writeln!(out, "============")?;
    writeln!(out, "Container: .{}", requirements.container())?;
    writeln!(out, "Codec: {}", requirements.codec())?;
    writeln!(out, "FPS: {}", requirements.fps())?;
    writeln!(out, "Durations: {} s", durations.join(", "))?;
    writeln!(out, "Max size: {} MB", requirements.max_file_size_mb())?;
    writeln!(out)?;
    writeln!(out, "Screens:")?;
    for screen in requirements.screens() {
        let night = if screen.night_version { " [night]" } else { "" };
        writeln!(out, "  {}: {}x{}{}", screen.name, screen.width, screen.height, night)?;
    }
    Ok(())
}

fn text_history(entries: &[HistoryEntry]) -> ClipGateResult<String> {
    let mut out = String::new();
    if entries.is_empty() {
        out.push_str("History is empty\n");
        return Ok(out);
    }

    for (index, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "[{}] {} {} {} | {} | {} | {} | {}",
            index,
            if entry.passed { "✓" } else { "✗" },
            entry.file_name,
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.duration,
            entry.container,
            entry.resolution,
            entry.file_size
        )
        .map_err(|e| ClipGateError::OutputError {
            message: e.to_string(),
        })?;
    }
    Ok(out)
}
